//! Fixed timestep frame driver
//!
//! The host calls [`FrameDriver::frame`] once per displayed frame with the
//! wall-clock time since the previous one. Queued host events are applied
//! first, then the session runs as many fixed ticks as the accumulator
//! holds, then the renderer gets exactly one view. Everything happens on the
//! caller's thread, one step at a time.

use std::collections::VecDeque;

use crate::consts::{MAX_FRAME_DELTA, MAX_SUBSTEPS};
use crate::renderer::Renderer;
use crate::session::{GameSession, HostEvent};
use crate::sim::GamePhase;

/// Whether the host loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Result of one driven frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub control: LoopControl,
    /// Fixed ticks run this frame
    pub ticks: u32,
    /// A tick this frame ended the run
    pub collided: bool,
}

/// Drives a [`GameSession`] from variable-rate frames
#[derive(Debug)]
pub struct FrameDriver {
    session: GameSession,
    accumulator: f32,
    pending: VecDeque<HostEvent>,
    frames: u64,
    exited: bool,
}

impl FrameDriver {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            accumulator: 0.0,
            pending: VecDeque::new(),
            frames: 0,
            exited: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn has_exited(&self) -> bool {
        self.exited
    }

    /// Queue a host event for the start of the next frame
    pub fn push_event(&mut self, event: HostEvent) {
        self.pending.push_back(event);
    }

    /// Apply pending events, run fixed ticks, then render once
    pub fn frame(&mut self, elapsed: f32, renderer: &mut impl Renderer) -> FrameReport {
        let mut report = FrameReport {
            control: LoopControl::Continue,
            ticks: 0,
            collided: false,
        };

        if self.exited {
            report.control = LoopControl::Exit;
            return report;
        }

        while let Some(event) = self.pending.pop_front() {
            // A new run starts without the previous run's leftover time
            if event == HostEvent::Restart && self.session.phase() == GamePhase::Over {
                self.accumulator = 0.0;
            }
            if self.session.handle_event(event) == LoopControl::Exit {
                self.exited = true;
                self.pending.clear();
                report.control = LoopControl::Exit;
                return report;
            }
        }

        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_DELTA)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let dt = self.session.dt();
        while self.accumulator >= dt && report.ticks < MAX_SUBSTEPS {
            report.collided |= self.session.tick().collided;
            self.accumulator -= dt;
            report.ticks += 1;
        }
        if self.accumulator >= dt {
            log::warn!(
                "Frame needed more than {} ticks, dropping {:.3}s",
                MAX_SUBSTEPS,
                self.accumulator - dt
            );
            self.accumulator = dt;
        }

        renderer.render(&self.session.view());
        self.frames += 1;

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::renderer::FrameView;
    use crate::settings::Settings;
    use crate::sim::Direction;

    #[derive(Default)]
    struct CountingRenderer {
        frames: u32,
        last_score: f32,
        last_phase: Option<GamePhase>,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, view: &FrameView<'_>) {
            self.frames += 1;
            self.last_score = view.score;
            self.last_phase = Some(view.phase);
        }
    }

    fn driver() -> FrameDriver {
        let mut settings = Settings::default();
        settings.seed = Some(77);
        FrameDriver::new(GameSession::new(settings).unwrap())
    }

    #[test]
    fn runs_whole_ticks_and_carries_remainder() {
        let mut driver = driver();
        let mut renderer = CountingRenderer::default();

        let report = driver.frame(0.05, &mut renderer);
        assert_eq!(report.ticks, 3);
        assert_eq!(report.control, LoopControl::Continue);
        assert_eq!(renderer.frames, 1);

        // 0.002 carried over + 0.015 = one more tick
        let report = driver.frame(0.015, &mut renderer);
        assert_eq!(report.ticks, 1);
        assert_eq!(renderer.frames, 2);
        assert!((renderer.last_score - 4.0 * SIM_DT).abs() < 1e-5);
    }

    #[test]
    fn short_frame_renders_without_ticking() {
        let mut driver = driver();
        let mut renderer = CountingRenderer::default();
        let report = driver.frame(0.001, &mut renderer);
        assert_eq!(report.ticks, 0);
        assert_eq!(renderer.frames, 1);
        assert_eq!(renderer.last_score, 0.0);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut driver = driver();
        let mut renderer = CountingRenderer::default();
        let report = driver.frame(5.0, &mut renderer);
        assert_eq!(report.ticks, 6);
        assert!(report.ticks <= MAX_SUBSTEPS);

        let report = driver.frame(f32::NAN, &mut renderer);
        assert_eq!(report.ticks, 0);
    }

    #[test]
    fn events_apply_before_ticks() {
        let mut driver = driver();
        let mut renderer = CountingRenderer::default();
        driver.push_event(HostEvent::Direction {
            direction: Direction::Right,
            pressed: true,
        });
        driver.frame(SIM_DT, &mut renderer);
        assert!(driver.session().world().player.pos.x > 0.0);
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut driver = driver();
        let mut renderer = CountingRenderer::default();
        driver.push_event(HostEvent::Exit);
        driver.push_event(HostEvent::Restart);

        let report = driver.frame(0.05, &mut renderer);
        assert_eq!(report.control, LoopControl::Exit);
        assert_eq!(report.ticks, 0);
        assert_eq!(renderer.frames, 0);
        assert!(driver.has_exited());

        let report = driver.frame(0.05, &mut renderer);
        assert_eq!(report.control, LoopControl::Exit);
        assert_eq!(driver.frames(), 0);
    }

    #[test]
    fn abandon_then_restart() {
        let mut driver = driver();
        let mut renderer = CountingRenderer::default();
        driver.frame(0.05, &mut renderer);

        driver.push_event(HostEvent::Abandon);
        driver.frame(0.05, &mut renderer);
        assert_eq!(renderer.last_phase, Some(GamePhase::Over));
        let frozen = renderer.last_score;
        driver.frame(0.05, &mut renderer);
        assert_eq!(renderer.last_score, frozen);

        driver.push_event(HostEvent::Restart);
        let report = driver.frame(0.0, &mut renderer);
        assert_eq!(report.ticks, 0);
        assert_eq!(renderer.last_phase, Some(GamePhase::Running));
        assert_eq!(renderer.last_score, 0.0);
    }

    #[test]
    fn ignored_restart_keeps_leftover_time() {
        let mut driver = driver();
        let mut renderer = CountingRenderer::default();
        assert_eq!(driver.frame(0.01, &mut renderer).ticks, 0);

        // Restart while running does nothing, so 0.01 + 0.01 still makes a tick
        driver.push_event(HostEvent::Restart);
        let report = driver.frame(0.01, &mut renderer);
        assert_eq!(driver.session().phase(), GamePhase::Running);
        assert_eq!(driver.session().runs(), 1);
        assert_eq!(report.ticks, 1);
    }
}

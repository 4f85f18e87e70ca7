//! Galactic Voyager entry point
//!
//! The native build has no window: it drives a session headlessly with a
//! simple autopilot and logs what a render pass would see.

use anyhow::{Context, Result};

use galactic_voyager::renderer::{FrameView, Renderer, build_frame};
use galactic_voyager::settings::Variant;
use galactic_voyager::sim::{Direction, GamePhase};
use galactic_voyager::{FrameDriver, GameSession, HostEvent, LoopControl, Settings};

/// JSON settings file
const CONFIG_ENV: &str = "GALACTIC_VOYAGER_CONFIG";
/// Preset name used when no settings file is given
const VARIANT_ENV: &str = "GALACTIC_VOYAGER_VARIANT";

/// Length of the demo in displayed frames (~30s at 60 Hz)
const DEMO_FRAMES: u64 = 60 * 30;
const FRAME_SECS: f32 = 1.0 / 60.0;

/// Logs a summary line every second of frames
#[derive(Default)]
struct LogRenderer {
    frames: u64,
    last_phase: Option<GamePhase>,
}

impl Renderer for LogRenderer {
    fn render(&mut self, view: &FrameView<'_>) {
        self.frames += 1;
        let vertices = build_frame(view);

        if self.last_phase != Some(view.phase) {
            match view.phase {
                GamePhase::Running => log::info!("Running"),
                GamePhase::Over => log::info!(
                    "Game Over! Final Score: {:.1} (best {:.1})",
                    view.score,
                    view.best_score.unwrap_or(view.score)
                ),
            }
            self.last_phase = Some(view.phase);
        }

        if self.frames.is_multiple_of(60) {
            log::debug!(
                "Score: {:.1} player x={:.2} obstacles={} vertices={}",
                view.score,
                view.player.pos.x,
                view.obstacles.len(),
                vertices.len()
            );
        }
    }
}

/// Steers away from the closest obstacle heading for the player's column
#[derive(Default)]
struct Autopilot {
    held: Option<Direction>,
}

impl Autopilot {
    fn decide(&mut self, session: &GameSession) -> Vec<HostEvent> {
        let world = session.world();
        let player = &world.player;

        let threat = world
            .obstacles
            .iter()
            .filter(|o| o.pos.y > player.pos.y && o.pos.y - player.pos.y < 0.6)
            .filter(|o| (o.pos.x - player.pos.x).abs() < o.half_extents.x + player.half_size + 0.1)
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        let want = threat.map(|o| {
            // Dodge toward the side with more room
            if o.pos.x > player.pos.x || (o.pos.x == player.pos.x && player.pos.x > 0.0) {
                Direction::Left
            } else {
                Direction::Right
            }
        });

        let mut events = Vec::new();
        if want != self.held {
            if let Some(direction) = self.held {
                events.push(HostEvent::Direction {
                    direction,
                    pressed: false,
                });
            }
            if let Some(direction) = want {
                events.push(HostEvent::Direction {
                    direction,
                    pressed: true,
                });
            }
            self.held = want;
        }
        events
    }
}

fn load_settings() -> Result<Settings> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Settings::load(&path).with_context(|| format!("loading {}", CONFIG_ENV));
    }
    let settings = match std::env::var(VARIANT_ENV) {
        Ok(name) => {
            let variant = Variant::from_name(&name)
                .with_context(|| format!("unknown variant {:?} in {}", name, VARIANT_ENV))?;
            log::info!("Using {} preset", variant.as_str());
            Settings::from_variant(variant)
        }
        Err(_) => Settings::default(),
    };
    settings.validate()?;
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Galactic Voyager (headless) starting...");

    let settings = load_settings()?;
    let session = GameSession::new(settings)?;
    log::info!("Seed: {}", session.seed());

    let mut driver = FrameDriver::new(session);
    let mut renderer = LogRenderer::default();
    let mut autopilot = Autopilot::default();

    for frame in 0..DEMO_FRAMES {
        if driver.session().phase() == GamePhase::Over {
            if let Some(direction) = autopilot.held.take() {
                driver.push_event(HostEvent::Direction {
                    direction,
                    pressed: false,
                });
            }
            driver.push_event(HostEvent::Restart);
        } else {
            for event in autopilot.decide(driver.session()) {
                driver.push_event(event);
            }
        }
        if frame + 1 == DEMO_FRAMES {
            driver.push_event(HostEvent::Exit);
        }

        if driver.frame(FRAME_SECS, &mut renderer).control == LoopControl::Exit {
            break;
        }
    }

    let session = driver.session();
    log::info!(
        "Demo finished after {} frames, {} run(s), best score {:.1}",
        driver.frames(),
        session.runs(),
        session.high_scores().top_score().unwrap_or(session.score())
    );
    Ok(())
}

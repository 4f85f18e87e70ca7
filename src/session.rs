//! Game session: lifecycle, score and host events
//!
//! `Running --(collision | abandon)--> Over --(restart)--> Running`, and an
//! exit request from either phase stops the loop for good.

use crate::driver::LoopControl;
use crate::error::ConfigError;
use crate::highscores::HighScores;
use crate::renderer::FrameView;
use crate::settings::Settings;
use crate::sim::rng::clock_seed;
use crate::sim::{
    Direction, GamePhase, InputLatch, OverReason, SeededRandom, StepResult, World, step,
};

/// Events delivered by the host (keyboard, window manager)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Direction key went down or up
    Direction { direction: Direction, pressed: bool },
    /// Start a new run after game over
    Restart,
    /// End the current run without a collision
    Abandon,
    /// Quit the game
    Exit,
}

/// Owns the world, the input latch and the random source
#[derive(Debug)]
pub struct GameSession {
    settings: Settings,
    world: World,
    latch: InputLatch,
    rng: SeededRandom,
    high_scores: HighScores,
    /// Runs started, including the current one
    runs: u32,
    exit_requested: bool,
}

impl GameSession {
    /// Validate the settings and start the first run
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(clock_seed);
        let mut rng = SeededRandom::new(seed);
        let world = World::new(&settings, &mut rng);
        log::info!(
            "New session: seed={} obstacles={:?} motion={:?} starfield={}",
            seed,
            settings.obstacle_model,
            settings.player_motion,
            settings.starfield
        );
        Ok(Self {
            settings,
            world,
            latch: InputLatch::new(),
            rng,
            high_scores: HighScores::new(),
            runs: 1,
            exit_requested: false,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn score(&self) -> f32 {
        self.world.score
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn latch(&self) -> &InputLatch {
        &self.latch
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Fixed tick length
    pub fn dt(&self) -> f32 {
        self.settings.tick_dt
    }

    /// Advance one fixed tick with the currently held directions
    pub fn tick(&mut self) -> StepResult {
        if self.exit_requested {
            return StepResult::default();
        }
        let input = self.latch.current_directions();
        let result = step(&mut self.world, self.settings.tick_dt, input, &mut self.rng);
        if result.collided {
            self.record_run();
        }
        result
    }

    /// Press or release a direction key; presses are ignored once the run is over
    pub fn set_direction(&mut self, direction: Direction, pressed: bool) {
        if pressed && !self.world.is_running() {
            return;
        }
        self.latch.set_direction(direction, pressed);
    }

    /// Start a new run from the initial configuration
    pub fn reset(&mut self) {
        self.world.reset(&mut self.rng);
        self.runs += 1;
        log::info!("Run {} started", self.runs);
    }

    /// End the running run without a collision
    pub fn abandon(&mut self) {
        if self.world.is_running() {
            self.world.end(OverReason::Abandoned);
            log::info!("Run abandoned at score {:.1}", self.world.score);
            self.record_run();
        }
    }

    /// Stop the loop; the host terminates the process
    pub fn request_exit(&mut self) {
        if !self.exit_requested {
            log::info!("Exit requested after {} run(s)", self.runs);
        }
        self.exit_requested = true;
    }

    /// Apply one host event
    pub fn handle_event(&mut self, event: HostEvent) -> LoopControl {
        match event {
            HostEvent::Direction { direction, pressed } => self.set_direction(direction, pressed),
            HostEvent::Restart => match self.world.phase {
                GamePhase::Over => self.reset(),
                GamePhase::Running => log::debug!("Restart ignored while running"),
            },
            HostEvent::Abandon => self.abandon(),
            HostEvent::Exit => self.request_exit(),
        }

        if self.exit_requested {
            LoopControl::Exit
        } else {
            LoopControl::Continue
        }
    }

    /// Read-only view for the render pass
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            player: &self.world.player,
            obstacles: &self.world.obstacles,
            stars: &self.world.stars.stars,
            score: self.world.score,
            phase: self.world.phase,
            best_score: self.high_scores.top_score(),
        }
    }

    fn record_run(&mut self) {
        let reason = self.world.over_reason.unwrap_or(OverReason::Abandoned);
        let score = self.world.score;
        if let Some(rank) = self.high_scores.add_score(score, self.world.ticks, reason) {
            log::info!("Final score {:.1} ranks #{}", score, rank);
        } else {
            log::info!("Final score {:.1}", score);
        }
    }
}

//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`World`]. The session owns exactly
//! one world; nothing else holds a reference across ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::spawn::Spawner;
use crate::consts::*;
use crate::settings::{ObstacleModel, PlayerMotion, Settings};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart or exit
    Over,
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverReason {
    /// Player box overlapped an obstacle box
    Collision { obstacle_id: u32 },
    /// Player gave up (escape key)
    Abandoned,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Center; y stays on the ground line
    pub pos: Vec2,
    /// Where the smoothed glide is heading
    pub target_x: f32,
    /// Collision half-extent on both axes
    pub half_size: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(0.0, PLAYER_GROUND_Y),
            target_x: 0.0,
            half_size: PLAYER_HALF_SIZE,
        }
    }
}

impl Player {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::splat(self.half_size)
    }

    /// Shift the glide target by `dx` and glide toward it by at most `max_step`
    pub fn glide(&mut self, dx: f32, max_step: f32) {
        self.target_x = crate::clamp_player_x(self.target_x + dx);
        self.pos.x = crate::clamp_player_x(crate::approach(self.pos.x, self.target_x, max_step));
    }

    /// Move the position by `dx` directly; the target follows
    pub fn shift(&mut self, dx: f32) {
        self.pos.x = crate::clamp_player_x(self.pos.x + dx);
        self.target_x = self.pos.x;
    }
}

/// A falling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    /// Downward displacement per tick
    pub speed: f32,
    pub half_extents: Vec2,
}

impl Obstacle {
    pub fn new(id: u32, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            pos,
            speed,
            half_extents: Vec2::new(OBSTACLE_HALF_WIDTH, OBSTACLE_HALF_HEIGHT),
        }
    }

    /// Whether it has dropped past the bottom of the screen
    #[inline]
    pub fn below_screen(&self) -> bool {
        self.pos.y < OBSTACLE_LOWER_BOUND
    }
}

/// A decorative background star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// Parallax layer index into [`Starfield::layer_speeds`]
    pub layer: usize,
}

/// Parallax star layers (empty when the starfield is disabled)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Starfield {
    pub layer_speeds: Vec<f32>,
    pub stars: Vec<Star>,
}

impl Starfield {
    /// Scatter `per_layer` stars uniformly over the screen for every layer
    pub fn new(layer_speeds: &[f32], per_layer: usize, rng: &mut impl RandomSource) -> Self {
        let mut stars = Vec::with_capacity(layer_speeds.len() * per_layer);
        for layer in 0..layer_speeds.len() {
            for _ in 0..per_layer {
                let pos = Vec2::new(rng.range(-1.0, 1.0), rng.range(-1.0, 1.0));
                stars.push(Star { pos, layer });
            }
        }
        Self {
            layer_speeds: layer_speeds.to_vec(),
            stars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Scroll every star down by its layer speed, wrapping at the bottom
    pub fn scroll(&mut self, rng: &mut impl RandomSource) {
        for star in &mut self.stars {
            let speed = self.layer_speeds.get(star.layer).copied().unwrap_or(0.0);
            star.pos.y -= speed;
            if star.pos.y < -1.0 {
                star.pos.y = 1.0;
                star.pos.x = rng.range(-1.0, 1.0);
            }
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub phase: GamePhase,
    pub over_reason: Option<OverReason>,
    /// Seconds survived this run
    pub score: f32,
    /// Running ticks this run
    pub ticks: u64,
    pub player: Player,
    /// Active obstacles (sorted by id)
    pub obstacles: Vec<Obstacle>,
    pub stars: Starfield,
    /// Present only for the dynamic spawn model
    pub spawner: Option<Spawner>,
    pub obstacle_model: ObstacleModel,
    pub player_motion: PlayerMotion,
    /// Horizontal displacement per tick
    pub glide_speed: f32,
    /// Next entity ID
    next_id: u32,
}

impl World {
    /// Build the initial world for the given settings
    pub fn new(settings: &Settings, rng: &mut impl RandomSource) -> Self {
        let stars = if settings.starfield {
            Starfield::new(&settings.star_layer_speeds, settings.stars_per_layer, rng)
        } else {
            Starfield::default()
        };
        let spawner = match settings.obstacle_model {
            ObstacleModel::FixedPool => None,
            ObstacleModel::DynamicSpawn => Some(Spawner::new(
                settings.spawn_interval,
                settings.spawn_speed_min,
                settings.spawn_speed_max,
                rng,
            )),
        };

        let mut world = Self {
            phase: GamePhase::Running,
            over_reason: None,
            score: 0.0,
            ticks: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            stars,
            spawner,
            obstacle_model: settings.obstacle_model,
            player_motion: settings.player_motion,
            glide_speed: settings.glide_speed,
            next_id: 1,
        };
        world.populate_obstacles();
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a fresh run: score, player, obstacles and spawn timer
    ///
    /// Stars keep scrolling from wherever they are.
    pub fn reset(&mut self, rng: &mut impl RandomSource) {
        self.phase = GamePhase::Running;
        self.over_reason = None;
        self.score = 0.0;
        self.ticks = 0;
        self.player = Player::default();
        self.populate_obstacles();
        if let Some(spawner) = &mut self.spawner {
            spawner.restart(rng);
        }
    }

    /// End the run
    pub fn end(&mut self, reason: OverReason) {
        self.phase = GamePhase::Over;
        self.over_reason = Some(reason);
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Initial obstacle configuration: staggered lanes, or nothing for dynamic spawns
    fn populate_obstacles(&mut self) {
        self.obstacles.clear();
        if self.obstacle_model == ObstacleModel::FixedPool {
            for (x, y, speed) in FIXED_LANES {
                let id = self.next_entity_id();
                self.obstacles.push(Obstacle::new(id, Vec2::new(x, y), speed));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Variant;
    use crate::sim::rng::SeededRandom;

    #[test]
    fn classic_world_starts_with_three_lanes() {
        let mut rng = SeededRandom::new(1);
        let world = World::new(&Settings::default(), &mut rng);
        assert_eq!(world.phase, GamePhase::Running);
        assert_eq!(world.obstacles.len(), 3);
        assert!(world.spawner.is_none());
        assert!(world.stars.is_empty());

        let ys: Vec<f32> = world.obstacles.iter().map(|o| o.pos.y).collect();
        assert_eq!(ys, vec![1.0, 1.5, 2.0]);
        let xs: Vec<f32> = world.obstacles.iter().map(|o| o.pos.x).collect();
        assert_eq!(xs, vec![-0.6, 0.0, 0.6]);
    }

    #[test]
    fn swarm_world_starts_empty_with_stars() {
        let mut rng = SeededRandom::new(1);
        let settings = Settings::from_variant(Variant::Swarm);
        let world = World::new(&settings, &mut rng);
        assert!(world.obstacles.is_empty());
        assert!(world.spawner.is_some());
        assert_eq!(
            world.stars.stars.len(),
            settings.star_layer_speeds.len() * settings.stars_per_layer
        );
        assert!(
            world
                .stars
                .stars
                .iter()
                .all(|s| s.pos.x.abs() <= 1.0 && s.pos.y.abs() <= 1.0)
        );
    }

    #[test]
    fn reset_restores_initial_configuration() {
        let mut rng = SeededRandom::new(3);
        let mut world = World::new(&Settings::default(), &mut rng);
        world.score = 12.5;
        world.ticks = 99;
        world.player.pos.x = 0.7;
        world.player.target_x = 0.9;
        world.obstacles[0].pos = Vec2::new(0.3, -0.4);
        world.obstacles.pop();
        world.end(OverReason::Abandoned);

        world.reset(&mut rng);
        assert_eq!(world.phase, GamePhase::Running);
        assert_eq!(world.over_reason, None);
        assert_eq!(world.score, 0.0);
        assert_eq!(world.ticks, 0);
        assert_eq!(world.player, Player::default());
        let layout: Vec<(f32, f32, f32)> = world
            .obstacles
            .iter()
            .map(|o| (o.pos.x, o.pos.y, o.speed))
            .collect();
        assert_eq!(layout, FIXED_LANES.to_vec());
    }

    #[test]
    fn glide_never_overshoots() {
        let mut player = Player::default();
        player.glide(0.05, 0.05);
        assert_eq!(player.target_x, 0.05);
        assert_eq!(player.pos.x, 0.05);

        // Target jumps ahead, position only moves one step
        player.target_x = 0.5;
        player.glide(0.0, 0.05);
        assert!((player.pos.x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn shift_clamps_and_syncs_target() {
        let mut player = Player::default();
        for _ in 0..100 {
            player.shift(-0.05);
        }
        assert_eq!(player.pos.x, -PLAYER_X_LIMIT);
        assert_eq!(player.target_x, -PLAYER_X_LIMIT);
    }

    #[test]
    fn stars_wrap_to_top() {
        let mut rng = SeededRandom::new(5);
        let mut field = Starfield {
            layer_speeds: vec![0.1],
            stars: vec![Star {
                pos: Vec2::new(0.2, -0.95),
                layer: 0,
            }],
        };
        field.scroll(&mut rng);
        let star = field.stars[0];
        assert_eq!(star.pos.y, 1.0);
        assert!(star.pos.x.abs() <= 1.0);
    }
}

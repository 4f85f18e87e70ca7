//! Timed obstacle spawning for the dynamic obstacle model
//!
//! The timer is an accumulating field checked once per tick. It is tested
//! before it accumulates, so a spawn lands on the first tick that starts
//! with the interval already elapsed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::Obstacle;
use crate::consts::{OBSTACLE_SPAWN_Y, PLAYER_X_LIMIT};
use crate::settings::SpawnInterval;

/// Spawn timer and obstacle template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds since the last spawn (or restart)
    pub elapsed: f32,
    /// Delay before the next spawn
    pub interval: f32,
    policy: SpawnInterval,
    speed_min: f32,
    speed_max: f32,
}

impl Spawner {
    pub fn new(
        policy: SpawnInterval,
        speed_min: f32,
        speed_max: f32,
        rng: &mut impl RandomSource,
    ) -> Self {
        let mut spawner = Self {
            elapsed: 0.0,
            interval: 0.0,
            policy,
            speed_min,
            speed_max,
        };
        spawner.restart(rng);
        spawner
    }

    /// Zero the timer and draw a fresh interval
    pub fn restart(&mut self, rng: &mut impl RandomSource) {
        self.elapsed = 0.0;
        self.interval = self.draw_interval(rng);
    }

    fn draw_interval(&self, rng: &mut impl RandomSource) -> f32 {
        match self.policy {
            SpawnInterval::Fixed { secs } => secs,
            SpawnInterval::Random { min, max } => rng.range(min, max),
        }
    }

    /// Advance the timer by one tick; returns true when an obstacle is due
    pub fn advance(&mut self, dt: f32, rng: &mut impl RandomSource) -> bool {
        if self.elapsed >= self.interval {
            self.restart(rng);
            return true;
        }
        self.elapsed += dt;
        false
    }

    /// New obstacle at the top of the screen with random x and speed
    pub fn spawn_obstacle(&self, id: u32, rng: &mut impl RandomSource) -> Obstacle {
        let x = rng.range(-PLAYER_X_LIMIT, PLAYER_X_LIMIT);
        let speed = rng.range(self.speed_min, self.speed_max);
        Obstacle::new(id, Vec2::new(x, OBSTACLE_SPAWN_Y), speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRandom, SeededRandom};

    fn fixed(secs: f32) -> Spawner {
        let mut rng = SeededRandom::new(0);
        Spawner::new(SpawnInterval::Fixed { secs }, 0.01, 0.02, &mut rng)
    }

    #[test]
    fn no_spawn_until_interval_elapsed() {
        let mut rng = SeededRandom::new(0);
        let mut spawner = fixed(2.0);
        spawner.elapsed = 1.99;

        assert!(!spawner.advance(0.016, &mut rng));
        assert!(spawner.elapsed >= 2.0);

        assert!(spawner.advance(0.016, &mut rng));
        assert_eq!(spawner.elapsed, 0.0);

        assert!(!spawner.advance(0.016, &mut rng));
    }

    #[test]
    fn fires_once_per_interval() {
        let mut rng = SeededRandom::new(0);
        let mut spawner = fixed(0.1);
        let fired = (0..100).filter(|_| spawner.advance(0.016, &mut rng)).count();
        // 7 accumulating ticks + 1 firing tick per cycle
        assert_eq!(fired, 100 / 8);
    }

    #[test]
    fn random_interval_drawn_from_bounds() {
        let mut rng = ScriptedRandom::new(vec![0.0, 1.0]);
        let mut spawner = Spawner::new(
            SpawnInterval::Random { min: 2.0, max: 5.0 },
            0.01,
            0.02,
            &mut rng,
        );
        assert_eq!(spawner.interval, 2.0);
        spawner.restart(&mut rng);
        assert_eq!(spawner.interval, 5.0);
    }

    #[test]
    fn spawned_obstacle_at_top_within_ranges() {
        let mut rng = SeededRandom::new(11);
        let spawner = fixed(2.0);
        for id in 0..50 {
            let obstacle = spawner.spawn_obstacle(id, &mut rng);
            assert_eq!(obstacle.pos.y, OBSTACLE_SPAWN_Y);
            assert!(obstacle.pos.x.abs() <= PLAYER_X_LIMIT);
            assert!((0.01..=0.02).contains(&obstacle.speed));
        }
    }
}

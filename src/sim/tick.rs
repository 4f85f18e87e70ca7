//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world deterministically. Obstacle and
//! star speeds are per-tick displacements; `dt` only feeds the score and the
//! spawn timer.

use super::collision;
use super::input::Directions;
use super::rng::RandomSource;
use super::state::{OverReason, World};
use crate::consts::{FIXED_LANES, OBSTACLE_SPAWN_Y};
use crate::settings::{ObstacleModel, PlayerMotion};

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepResult {
    /// The player was hit and the run ended this tick
    pub collided: bool,
    /// A new obstacle entered at the top
    pub spawned: bool,
    /// Fixed-pool obstacles sent back to the top
    pub recycled: u32,
    /// Dynamic obstacles removed below the screen
    pub despawned: u32,
}

/// Advance the world by one fixed timestep
///
/// Does nothing once the run is over. A collision ends the run immediately:
/// the score and the player keep the values they had before the hit.
pub fn step(
    world: &mut World,
    dt: f32,
    input: Directions,
    rng: &mut impl RandomSource,
) -> StepResult {
    let mut result = StepResult::default();
    if !world.is_running() {
        return result;
    }

    // Background parallax
    world.stars.scroll(rng);

    // Falling obstacles
    match world.obstacle_model {
        ObstacleModel::FixedPool => {
            for obstacle in &mut world.obstacles {
                obstacle.pos.y -= obstacle.speed;
                if obstacle.below_screen() {
                    obstacle.pos.y = OBSTACLE_SPAWN_Y;
                    obstacle.pos.x = FIXED_LANES[rng.index(FIXED_LANES.len())].0;
                    result.recycled += 1;
                }
            }
        }
        ObstacleModel::DynamicSpawn => {
            for obstacle in &mut world.obstacles {
                obstacle.pos.y -= obstacle.speed;
            }
            let before = world.obstacles.len();
            world.obstacles.retain(|o| !o.below_screen());
            result.despawned = (before - world.obstacles.len()) as u32;
        }
    }

    // Timed spawns
    let due = world
        .spawner
        .as_mut()
        .is_some_and(|spawner| spawner.advance(dt, rng));
    if due {
        let id = world.next_entity_id();
        if let Some(spawner) = &world.spawner {
            let obstacle = spawner.spawn_obstacle(id, rng);
            log::debug!(
                "Spawned obstacle {} at x={:.2} speed={:.3}",
                id,
                obstacle.pos.x,
                obstacle.speed
            );
            world.obstacles.push(obstacle);
            result.spawned = true;
        }
    }

    // Collision ends the run; nothing else changes this tick
    if let Some(obstacle_id) = collision::first_hit(&world.player, &world.obstacles).map(|o| o.id)
    {
        world.end(OverReason::Collision { obstacle_id });
        log::info!(
            "Player hit obstacle {} after {} ticks, score {:.1}",
            obstacle_id,
            world.ticks,
            world.score
        );
        result.collided = true;
        return result;
    }

    world.score += dt;
    world.ticks += 1;

    // Player movement
    let dx = input.displacement(world.glide_speed);
    match world.player_motion {
        PlayerMotion::Smoothed => world.player.glide(dx, world.glide_speed),
        PlayerMotion::Direct => world.player.shift(dx),
    }

    result
}

//! Axis-aligned box overlap
//!
//! Every entity is a box given by its center and half-extents. Boxes that
//! only touch along an edge do not collide.

use glam::Vec2;

use super::state::{Obstacle, Player};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let gap = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        gap.x < reach.x && gap.y < reach.y
    }
}

impl From<&Player> for Aabb {
    fn from(player: &Player) -> Self {
        Aabb::new(player.pos, player.half_extents())
    }
}

impl From<&Obstacle> for Aabb {
    fn from(obstacle: &Obstacle) -> Self {
        Aabb::new(obstacle.pos, obstacle.half_extents)
    }
}

/// First obstacle (in iteration order) overlapping the player
pub fn first_hit<'a>(player: &Player, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    let player_box = Aabb::from(player);
    obstacles
        .iter()
        .find(|obstacle| player_box.overlaps(&Aabb::from(*obstacle)))
}

//! Held direction keys
//!
//! Key events only flip booleans here; the next tick reads them. Holding
//! both directions is legal and the two displacements cancel out.

use serde::{Deserialize, Serialize};

/// Horizontal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Directions held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directions {
    pub left: bool,
    pub right: bool,
}

impl Directions {
    pub fn contains(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.left && !self.right
    }

    /// Net horizontal displacement for the given per-direction step
    pub fn displacement(&self, step: f32) -> f32 {
        let mut dx = 0.0;
        if self.left {
            dx -= step;
        }
        if self.right {
            dx += step;
        }
        dx
    }
}

/// Latch of currently-held direction keys
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    held: Directions,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_direction(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Left => self.held.left = pressed,
            Direction::Right => self.held.right = pressed,
        }
    }

    pub fn current_directions(&self) -> Directions {
        self.held
    }
}

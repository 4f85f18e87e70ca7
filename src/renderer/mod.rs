//! Render-side view of the game
//!
//! The simulation never draws. Each frame the driver hands a [`FrameView`]
//! to a [`Renderer`]; `shapes` turns that view into colored triangles a GPU
//! backend can upload as-is.

pub mod shapes;
pub mod vertex;

pub use shapes::build_frame;
pub use vertex::Vertex;

use crate::sim::{GamePhase, Obstacle, Player, Star};

/// Read-only snapshot of everything a frame needs
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub stars: &'a [Star],
    pub score: f32,
    pub phase: GamePhase,
    /// Best finished run so far
    pub best_score: Option<f32>,
}

/// Render pass supplied by the host
pub trait Renderer {
    fn render(&mut self, view: &FrameView<'_>);
}

//! Shape generation for 2D primitives
//!
//! Rectangles are drawn at exactly twice the collision half-extents, so what
//! the player sees is what the overlap test uses.

use glam::Vec2;

use super::FrameView;
use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, Star};

/// Half-size of the square drawn for a star
pub const STAR_HALF_SIZE: f32 = 0.004;

/// Append two triangles covering an axis-aligned rectangle
pub fn push_rect(out: &mut Vec<Vertex>, center: Vec2, half_extents: Vec2, color: [f32; 4]) {
    let min = center - half_extents;
    let max = center + half_extents;

    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));

    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));
    out.push(Vertex::new(min.x, max.y, color));
}

fn star_color(star: &Star) -> [f32; 4] {
    let last = colors::STAR_LAYERS.len() - 1;
    colors::STAR_LAYERS[star.layer.min(last)]
}

/// Triangles for one frame: stars, then obstacles, then the player
///
/// Once the run is over only the starfield is drawn; the host overlays its
/// own game-over text.
pub fn build_frame(view: &FrameView<'_>) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((view.stars.len() + view.obstacles.len() + 1) * 6);

    for star in view.stars {
        push_rect(
            &mut vertices,
            star.pos,
            Vec2::splat(STAR_HALF_SIZE),
            star_color(star),
        );
    }

    if view.phase == GamePhase::Running {
        for obstacle in view.obstacles {
            push_rect(
                &mut vertices,
                obstacle.pos,
                obstacle.half_extents,
                colors::OBSTACLE,
            );
        }
        push_rect(
            &mut vertices,
            view.player.pos,
            view.player.half_extents(),
            colors::PLAYER,
        );
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Obstacle, Player};

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for v in vertices {
            let p = Vec2::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    #[test]
    fn rect_matches_half_extents() {
        let mut out = Vec::new();
        push_rect(&mut out, Vec2::new(0.5, 0.5), Vec2::new(0.05, 0.025), colors::OBSTACLE);
        assert_eq!(out.len(), 6);
        let (min, max) = bounds(&out);
        assert!((min - Vec2::new(0.45, 0.475)).abs().max_element() < 1e-6);
        assert!((max - Vec2::new(0.55, 0.525)).abs().max_element() < 1e-6);
    }

    #[test]
    fn frame_draws_everything_while_running() {
        let player = Player::default();
        let obstacles = vec![
            Obstacle::new(1, Vec2::new(-0.6, 1.0), 0.01),
            Obstacle::new(2, Vec2::new(0.0, 1.5), 0.015),
        ];
        let stars = vec![Star {
            pos: Vec2::ZERO,
            layer: 7,
        }];
        let view = FrameView {
            player: &player,
            obstacles: &obstacles,
            stars: &stars,
            score: 0.0,
            phase: GamePhase::Running,
            best_score: None,
        };
        let vertices = build_frame(&view);
        assert_eq!(vertices.len(), 4 * 6);
        // Out-of-range layer uses the nearest layer color
        assert_eq!(vertices[0].color, colors::STAR_LAYERS[2]);
        assert_eq!(vertices.last().map(|v| v.color), Some(colors::PLAYER));
    }

    #[test]
    fn frame_hides_entities_when_over() {
        let player = Player::default();
        let obstacles = vec![Obstacle::new(1, Vec2::ZERO, 0.01)];
        let view = FrameView {
            player: &player,
            obstacles: &obstacles,
            stars: &[],
            score: 4.2,
            phase: GamePhase::Over,
            best_score: Some(4.2),
        };
        assert!(build_frame(&view).is_empty());
    }
}

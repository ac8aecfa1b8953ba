//! Shape generation for 2D primitives

use glam::Vec2;
use rand::Rng;

use super::vertex::{Vertex, colors};
use crate::sim::{Cell, GameState};

/// Two triangles covering an axis-aligned square
pub fn square(min: Vec2, size: f32, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + Vec2::splat(size);
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

fn cell_square(cell: Cell, size: f32, color: [f32; 4]) -> [Vertex; 6] {
    square(cell.as_vec2(), size, color)
}

/// Gradient color for segment `index` of `len` with a green jitter in [0, 1)
fn segment_color(index: usize, len: usize, jitter: f32) -> [f32; 4] {
    let len = len.max(1) as f32;
    let i = index as f32;
    let r = (255.0 * i / len).floor();
    let g = (50.0 * jitter * i).floor() % 255.0;
    let b = (255.0 * (len - i) / len).floor();
    [r / 255.0, g / 255.0, b / 255.0, colors::SEGMENT_ALPHA]
}

/// Per-segment colors: red rises and blue falls from head to tail, green
/// flickers. Recomputed after every tick to make the body shimmer.
pub fn segment_colors<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<[f32; 4]> {
    (0..len)
        .map(|i| segment_color(i, len, rng.random::<f32>()))
        .collect()
}

/// Triangles for one frame: snake body, then food on top
///
/// Segments beyond `palette` fall back to the unjittered gradient. Food is
/// skipped once it has been parked off the board.
pub fn frame(state: &GameState, palette: &[[f32; 4]]) -> Vec<Vertex> {
    let size = state.board().cell_size() as f32;
    let len = state.len();
    let mut vertices = Vec::with_capacity((len + 1) * 6);

    for (i, &cell) in state.snake().iter().enumerate() {
        let color = palette
            .get(i)
            .copied()
            .unwrap_or_else(|| segment_color(i, len, 0.0));
        vertices.extend(cell_square(cell, size, color));
    }

    if state.board().contains(state.food) {
        vertices.extend(cell_square(state.food, size, colors::FOOD));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_square_corners() {
        let v = square(Vec2::new(20.0, 40.0), 20.0, colors::FOOD);
        assert_eq!(v[0].position, [20.0, 40.0]);
        assert_eq!(v[5].position, [40.0, 60.0]);
        assert!(v.iter().all(|v| v.color == colors::FOOD));
    }

    #[test]
    fn test_segment_gradient() {
        let head = segment_color(0, 4, 0.9);
        assert_eq!(head[0], 0.0);
        assert_eq!(head[1], 0.0);
        assert_eq!(head[2], 1.0);
        assert_eq!(head[3], colors::SEGMENT_ALPHA);

        let tail = segment_color(3, 4, 0.0);
        assert_eq!(tail[0], 191.0 / 255.0);
        assert_eq!(tail[2], 63.0 / 255.0);
    }

    #[test]
    fn test_segment_colors_in_range() {
        let mut rng = Pcg32::seed_from_u64(4);
        let palette = segment_colors(40, &mut rng);
        assert_eq!(palette.len(), 40);
        for color in palette {
            assert!(color.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn test_frame_draws_snake_and_food() {
        let state = GameState::new(&Settings::default(), 1);
        let vertices = frame(&state, &[]);
        assert_eq!(vertices.len(), (state.len() + 1) * 6);
        assert_eq!(vertices[0].position, [100.0, 380.0]);
        assert_eq!(vertices.last().unwrap().color, colors::FOOD);
        assert_eq!(vertices.last().unwrap().position, [420.0, 420.0]);
    }

    #[test]
    fn test_frame_skips_parked_food() {
        let mut state = GameState::new(&Settings::default(), 1);
        state.food = state.board().off_board();
        let vertices = frame(&state, &[]);
        assert_eq!(vertices.len(), state.len() * 6);
    }
}

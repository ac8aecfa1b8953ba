//! Movement directions

use glam::IVec2;

/// Direction of travel for the snake head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit offset for one step, scaled to pixels (y grows downward)
    pub fn delta(self, cell_size: i32) -> IVec2 {
        match self {
            Direction::Left => IVec2::new(-cell_size, 0),
            Direction::Right => IVec2::new(cell_size, 0),
            Direction::Up => IVec2::new(0, -cell_size),
            Direction::Down => IVec2::new(0, cell_size),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

//! Keyboard input
//!
//! Keys map to directions through a fixed table. Accepted directions wait in a
//! short queue so quick two-key turns land on consecutive ticks. Reversals are
//! not filtered here; `sim::tick` is the only place that rejects them.

use std::collections::VecDeque;

use crate::sim::Direction;

/// Maximum queued turns
pub const INPUT_QUEUE_LEN: usize = 3;

/// Map a `KeyboardEvent.key` value to a direction (arrows and WASD)
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        _ => None,
    }
}

/// Pending turns, consumed one per tick
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<Direction>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(INPUT_QUEUE_LEN),
        }
    }

    /// Queue a turn. Repeats of the last queued turn and overflow are dropped.
    /// Returns true if the turn was queued.
    pub fn push(&mut self, dir: Direction) -> bool {
        if self.pending.back() == Some(&dir) || self.pending.len() >= INPUT_QUEUE_LEN {
            return false;
        }
        self.pending.push_back(dir);
        true
    }

    /// Next turn for the upcoming tick
    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

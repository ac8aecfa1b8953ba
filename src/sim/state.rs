//! Game state and core simulation types

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::{Board, Cell};
use super::direction::Direction;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Snake is moving
    Playing,
    /// Snake ran into itself; ticks are ignored until reset
    GameOver,
}

/// What happens when the head would move onto the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Freeze the game in `GameOver`
    #[default]
    EndGame,
    /// Drop the move and keep playing
    Ignore,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Food placement RNG
    pub(crate) rng: Pcg32,
    pub(crate) board: Board,
    /// Body cells, head first
    pub(crate) snake: VecDeque<Cell>,
    pub direction: Direction,
    pub food: Cell,
    pub score: u32,
    pub phase: GamePhase,
    pub policy: CollisionPolicy,
}

impl GameState {
    /// Create a new game state with the standard start layout
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            board: Board::new(settings.board_cells, settings.cell_size),
            snake: VecDeque::new(),
            direction: Direction::Right,
            food: Cell::ZERO,
            score: 0,
            phase: GamePhase::Playing,
            policy: settings.collision_policy,
        };
        state.reset();
        state
    }

    /// Restore the start layout: three cells heading right, fixed food, score 0
    ///
    /// The RNG keeps its stream so consecutive games differ.
    pub fn reset(&mut self) {
        let cols = self.board.cols();
        let rows = self.board.rows();
        let row = START_HEAD.1.min(rows - 1);
        let head_col = START_HEAD.0.min(cols - 1);
        let len = START_LENGTH.min(head_col as usize + 1);
        let body: Vec<Cell> = (0..len as i32)
            .map(|i| self.board.cell(head_col - i, row))
            .collect();

        self.set_snake(body, Direction::Right);
        self.score = 0;
        self.phase = GamePhase::Playing;

        let food = self.board.cell(START_FOOD.0, START_FOOD.1);
        self.food = if self.board.contains(food) && !self.board.is_occupied(food) {
            food
        } else {
            self.board
                .place_food(&mut self.rng)
                .unwrap_or_else(|| self.board.off_board())
        };
    }

    /// Replace the snake body (head first) and rebuild the occupancy grid
    pub fn set_snake(&mut self, body: impl IntoIterator<Item = Cell>, direction: Direction) {
        self.snake = body.into_iter().collect();
        self.direction = direction;
        self.board.clear();
        for &cell in &self.snake {
            self.board.occupy(cell);
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Body cells, head first
    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    pub fn head(&self) -> Cell {
        self.snake.front().copied().unwrap_or(Cell::ZERO)
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// True once food has been parked off the board
    pub fn is_stalemate(&self) -> bool {
        !self.board.contains(self.food)
    }

    /// Occupancy flag for a cell
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.board.is_occupied(cell)
    }
}

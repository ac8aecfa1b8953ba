//! Demo steering for headless runs
//!
//! Greedy: among the turns `tick` would accept, skip any that lands on the
//! body and take the one closest to the food, measuring distance on the
//! wrapped board.

use std::fmt;

use super::board::Cell;
use super::direction::Direction;
use super::state::GameState;
use super::tick::{TickOutcome, tick, tick_interval_ms};
use crate::settings::Settings;

/// Shortest axis distance when edges wrap
fn wrapped_axis(a: i32, b: i32, span: i32) -> i32 {
    let d = (a - b).abs();
    d.min(span - d)
}

fn wrapped_distance(state: &GameState, from: Cell, to: Cell) -> i32 {
    let board = state.board();
    wrapped_axis(from.x, to.x, board.width()) + wrapped_axis(from.y, to.y, board.height())
}

/// Pick a direction for the next tick, `None` when every move is blocked
pub fn steer(state: &GameState) -> Option<Direction> {
    let board = state.board();
    let head = state.head();

    Direction::ALL
        .into_iter()
        .filter(|dir| !dir.is_opposite(state.direction))
        .map(|dir| (dir, board.wrap(head + dir.delta(board.cell_size()))))
        .filter(|(_, next)| !state.snake().contains(next))
        .min_by_key(|&(dir, next)| {
            // Ties keep going straight
            (wrapped_distance(state, next, state.food), dir != state.direction)
        })
        .map(|(dir, _)| dir)
}

/// Why a headless run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnding {
    TimeLimit,
    SelfCollision,
    /// Every move is onto the body under `CollisionPolicy::Ignore`
    BoxedIn,
}

impl fmt::Display for RunEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunEnding::TimeLimit => "time limit",
            RunEnding::SelfCollision => "self-collision",
            RunEnding::BoxedIn => "boxed in",
        })
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: u64,
    /// Wall time the same run would take in the browser
    pub play_ms: u64,
    pub score: u32,
    pub length: usize,
    pub ending: RunEnding,
}

/// Drive one game with `steer` until it ends or `max_ticks` pass
pub fn run(settings: &Settings, seed: u64, max_ticks: u64) -> RunSummary {
    let mut state = GameState::new(settings, seed);
    let mut ticks = 0;
    let mut play_ms = 0u64;
    let mut ending = RunEnding::TimeLimit;

    while ticks < max_ticks {
        play_ms += u64::from(tick_interval_ms(state.score, settings));
        ticks += 1;
        let dir = steer(&state);
        match tick(&mut state, dir) {
            TickOutcome::Ate { food_placed: true } => {
                log::debug!("tick {}: score {}", ticks, state.score);
            }
            TickOutcome::Ate { food_placed: false } => {
                log::info!("tick {}: board full", ticks);
            }
            TickOutcome::Crashed | TickOutcome::Halted => {
                ending = RunEnding::SelfCollision;
                break;
            }
            TickOutcome::Blocked => {
                ending = RunEnding::BoxedIn;
                break;
            }
            TickOutcome::Moved => {}
        }
    }

    log::info!("Run finished after {} ticks: {}", ticks, ending);
    RunSummary {
        ticks,
        play_ms,
        score: state.score,
        length: state.len(),
        ending,
    }
}

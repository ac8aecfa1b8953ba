//! Discrete simulation tick
//!
//! Advances the snake by exactly one cell.

use super::direction::Direction;
use super::state::{CollisionPolicy, GamePhase, GameState};
use crate::settings::Settings;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Head advanced, tail followed
    Moved,
    /// Head landed on food; `food_placed` is false when the board is full
    Ate { food_placed: bool },
    /// Self-collision under `CollisionPolicy::Ignore`; nothing changed
    Blocked,
    /// Self-collision under `CollisionPolicy::EndGame`; game is now over
    Crashed,
    /// Game was already over
    Halted,
}

impl TickOutcome {
    pub fn ate(&self) -> bool {
        matches!(self, TickOutcome::Ate { .. })
    }
}

/// Advance the game state by one step
///
/// `requested` is adopted as the new direction unless it reverses the current
/// one. `None` keeps going straight.
pub fn tick(state: &mut GameState, requested: Option<Direction>) -> TickOutcome {
    if state.phase == GamePhase::GameOver {
        return TickOutcome::Halted;
    }

    let previous = state.direction;
    if let Some(dir) = requested {
        if !dir.is_opposite(state.direction) {
            state.direction = dir;
        }
    }

    let board = &state.board;
    let next = board.wrap(state.head() + state.direction.delta(board.cell_size()));

    if state.snake.contains(&next) {
        // Collisions never mutate the body, food or score
        state.direction = previous;
        return match state.policy {
            CollisionPolicy::EndGame => {
                state.phase = GamePhase::GameOver;
                log::info!(
                    "Self-collision at ({}, {}), final score {}",
                    next.x,
                    next.y,
                    state.score
                );
                TickOutcome::Crashed
            }
            CollisionPolicy::Ignore => {
                log::debug!("Ignored move onto body at ({}, {})", next.x, next.y);
                TickOutcome::Blocked
            }
        };
    }

    state.snake.push_front(next);
    state.board.occupy(next);

    if next == state.food {
        state.score += 1;
        let placed = state.board.place_food(&mut state.rng);
        state.food = placed.unwrap_or_else(|| state.board.off_board());
        if placed.is_none() {
            log::info!("Board full at score {}, no room for food", state.score);
        }
        TickOutcome::Ate {
            food_placed: placed.is_some(),
        }
    } else {
        if let Some(tail) = state.snake.pop_back() {
            state.board.vacate(tail);
        }
        TickOutcome::Moved
    }
}

/// Tick interval for a score: speeds up every few foods, never below the floor
pub fn tick_interval_ms(score: u32, settings: &Settings) -> u32 {
    let steps = score / settings.speedup_every.max(1);
    settings
        .base_tick_ms
        .saturating_sub(steps.saturating_mul(settings.speedup_step_ms))
        .max(settings.min_tick_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Cell;
    use glam::IVec2;
    use proptest::prelude::*;

    fn c(x: i32, y: i32) -> Cell {
        IVec2::new(x, y)
    }

    fn new_state() -> GameState {
        GameState::new(&Settings::default(), 12345)
    }

    fn body(state: &GameState) -> Vec<Cell> {
        state.snake().iter().copied().collect()
    }

    /// Every body cell is flagged and nothing else is
    fn assert_grid_in_sync(state: &GameState) {
        let board = state.board();
        for i in 0..board.cell_count() {
            let cell = board.cell_at(i);
            assert_eq!(
                board.is_occupied(cell),
                state.snake().contains(&cell),
                "grid out of sync at {:?}",
                cell
            );
        }
        assert_eq!(board.filled(), state.len());
    }

    #[test]
    fn test_tick_moves_right_from_start() {
        let mut state = new_state();
        let outcome = tick(&mut state, None);

        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(body(&state), vec![c(120, 380), c(100, 380), c(80, 380)]);
        assert!(!state.is_occupied(c(60, 380)));
        assert!(state.is_occupied(c(120, 380)));
        assert_eq!(state.score, 0);
        assert_grid_in_sync(&state);
    }

    #[test]
    fn test_tick_adopts_turn() {
        let mut state = new_state();
        tick(&mut state, Some(Direction::Up));
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.head(), c(100, 360));
    }

    #[test]
    fn test_tick_rejects_reversal() {
        let mut state = new_state();
        let outcome = tick(&mut state, Some(Direction::Left));
        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.head(), c(120, 380));
    }

    #[test]
    fn test_wraparound_each_edge() {
        let cases = [
            (Direction::Left, c(0, 200), c(580, 200)),
            (Direction::Right, c(580, 200), c(0, 200)),
            (Direction::Up, c(200, 0), c(200, 580)),
            (Direction::Down, c(200, 580), c(200, 0)),
        ];
        for (dir, head, expected) in cases {
            let mut state = new_state();
            state.set_snake([head], dir);
            let outcome = tick(&mut state, None);
            assert_eq!(outcome, TickOutcome::Moved);
            assert_eq!(state.head(), expected, "wrapping {}", dir.as_str());
            assert!(!state.is_game_over());
            assert_grid_in_sync(&state);
        }
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = new_state();
        state.food = c(120, 380);

        let outcome = tick(&mut state, None);

        assert_eq!(outcome, TickOutcome::Ate { food_placed: true });
        assert_eq!(state.len(), 4);
        assert_eq!(state.score, 1);
        assert!(state.is_occupied(c(60, 380)));
        assert!(state.board().contains(state.food));
        assert!(!state.snake().contains(&state.food));
        assert_grid_in_sync(&state);
    }

    /// Body curls back under the head, so turning down runs into it
    fn hooked_snake(state: &mut GameState) {
        state.set_snake(
            [c(100, 100), c(80, 100), c(80, 120), c(100, 120), c(120, 120)],
            Direction::Right,
        );
    }

    #[test]
    fn test_self_collision_ends_game() {
        let mut state = new_state();
        hooked_snake(&mut state);
        let before = body(&state);

        let outcome = tick(&mut state, Some(Direction::Down));

        assert_eq!(outcome, TickOutcome::Crashed);
        assert!(state.is_game_over());
        assert_eq!(body(&state), before);
        assert_eq!(state.direction, Direction::Right);
        assert_grid_in_sync(&state);

        // Further ticks are ignored
        assert_eq!(tick(&mut state, Some(Direction::Up)), TickOutcome::Halted);
        assert_eq!(body(&state), before);
    }

    #[test]
    fn test_self_collision_ignored() {
        let mut state = new_state();
        state.policy = CollisionPolicy::Ignore;
        hooked_snake(&mut state);
        let before = body(&state);

        let outcome = tick(&mut state, Some(Direction::Down));

        assert_eq!(outcome, TickOutcome::Blocked);
        assert!(!state.is_game_over());
        assert_eq!(body(&state), before);
        assert_eq!(state.direction, Direction::Right);

        // Steering away keeps the game going
        assert_eq!(tick(&mut state, Some(Direction::Up)), TickOutcome::Moved);
        assert_eq!(state.head(), c(100, 80));
    }

    #[test]
    fn test_collision_after_wrap() {
        let mut state = new_state();
        // Head at the right edge, body occupies the left edge of the same row
        state.set_snake([c(580, 0), c(580, 20), c(0, 20), c(0, 0), c(20, 0)], Direction::Up);
        let outcome = tick(&mut state, Some(Direction::Right));
        assert_eq!(outcome, TickOutcome::Crashed);
    }

    #[test]
    fn test_collision_is_deterministic() {
        let mut a = new_state();
        let mut b = new_state();
        hooked_snake(&mut a);
        hooked_snake(&mut b);
        assert_eq!(
            tick(&mut a, Some(Direction::Down)),
            tick(&mut b, Some(Direction::Down))
        );
        assert_eq!(body(&a), body(&b));
    }

    #[test]
    fn test_board_full_parks_food() {
        let settings = Settings {
            board_cells: 2,
            cell_size: 10,
            ..Default::default()
        };
        let mut state = GameState::new(&settings, 9);
        // Three cells filled, food on the last free one
        state.set_snake([c(10, 0), c(0, 0), c(0, 10)], Direction::Down);
        state.food = c(10, 10);

        let outcome = tick(&mut state, None);

        assert_eq!(outcome, TickOutcome::Ate { food_placed: false });
        assert_eq!(state.len(), state.board().cell_count());
        assert_eq!(state.food, c(-10, -10));
        assert!(state.is_stalemate());
        assert_grid_in_sync(&state);

        // Every neighbour is body now
        assert_eq!(tick(&mut state, None), TickOutcome::Crashed);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(&Settings::default(), 99999);
        let mut state2 = GameState::new(&Settings::default(), 99999);
        let inputs = [
            Some(Direction::Down),
            None,
            Some(Direction::Right),
            Some(Direction::Up),
            None,
        ];

        for _ in 0..40 {
            for input in inputs {
                // Keep feeding so food placement is exercised
                for state in [&mut state1, &mut state2] {
                    let ahead = state.head() + state.direction.delta(20);
                    state.food = state.board().wrap(ahead);
                }
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(body(&state1), body(&state2));
        assert_eq!(state1.food, state2.food);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.phase, state2.phase);
    }

    #[test]
    fn test_tick_interval_speeds_up_with_floor() {
        let settings = Settings::default();
        assert_eq!(tick_interval_ms(0, &settings), 100);
        assert_eq!(tick_interval_ms(4, &settings), 100);
        assert_eq!(tick_interval_ms(5, &settings), 95);
        assert_eq!(tick_interval_ms(49, &settings), 55);
        assert_eq!(tick_interval_ms(80, &settings), 20);
        assert_eq!(tick_interval_ms(85, &settings), 16);
        assert_eq!(tick_interval_ms(10_000, &settings), 16);
    }

    fn direction_strategy() -> impl Strategy<Value = Option<Direction>> {
        prop_oneof![
            Just(None),
            Just(Some(Direction::Left)),
            Just(Some(Direction::Right)),
            Just(Some(Direction::Up)),
            Just(Some(Direction::Down)),
        ]
    }

    proptest! {
        #[test]
        fn prop_tick_keeps_invariants(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(direction_strategy(), 1..200),
            ignore in any::<bool>(),
        ) {
            let settings = Settings {
                board_cells: 8,
                collision_policy: if ignore { CollisionPolicy::Ignore } else { CollisionPolicy::EndGame },
                ..Default::default()
            };
            let mut state = GameState::new(&settings, seed);

            for input in inputs {
                let before_dir = state.direction;
                let before_len = state.len();
                let before_score = state.score;
                let before_tail = state.snake().back().copied();

                let outcome = tick(&mut state, input);

                match outcome {
                    TickOutcome::Moved => {
                        prop_assert_eq!(state.len(), before_len);
                        prop_assert_eq!(state.score, before_score);
                        if let Some(tail) = before_tail {
                            prop_assert!(!state.is_occupied(tail));
                        }
                    }
                    TickOutcome::Ate { food_placed } => {
                        prop_assert_eq!(state.len(), before_len + 1);
                        prop_assert_eq!(state.score, before_score + 1);
                        if food_placed {
                            prop_assert!(!state.is_occupied(state.food));
                        } else {
                            prop_assert!(state.is_stalemate());
                        }
                    }
                    TickOutcome::Blocked | TickOutcome::Crashed | TickOutcome::Halted => {
                        prop_assert_eq!(state.len(), before_len);
                        prop_assert_eq!(state.direction, before_dir);
                    }
                }

                if let (Some(dir), TickOutcome::Moved | TickOutcome::Ate { .. }) = (input, outcome) {
                    if !dir.is_opposite(before_dir) {
                        prop_assert_eq!(state.direction, dir);
                    } else {
                        prop_assert_eq!(state.direction, before_dir);
                    }
                }

                let board = state.board();
                for i in 0..board.cell_count() {
                    let cell = board.cell_at(i);
                    prop_assert_eq!(board.is_occupied(cell), state.snake().contains(&cell));
                }
                prop_assert_eq!(board.filled(), state.len());
            }
        }
    }
}

//! One play session: game state, tick timer, queued input and segment colors
//!
//! Everything the browser shell does between DOM events lives here, so the
//! shell only forwards key presses and frame times and draws the result.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::MAX_CATCHUP_TICKS;
use crate::input::{InputQueue, direction_for_key};
use crate::renderer::segment_colors;
use crate::schedule::TickTimer;
use crate::settings::Settings;
use crate::sim::{GameState, TickOutcome, tick, tick_interval_ms};

/// Seed offset for the cosmetic color stream
const PALETTE_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct Session {
    settings: Settings,
    state: GameState,
    timer: TickTimer,
    input: InputQueue,
    /// Segment colors, refreshed every tick
    palette: Vec<[f32; 4]>,
    palette_rng: Pcg32,
    /// Final frame still has to be exported
    snapshot_pending: bool,
}

impl Session {
    /// Start a game with the timer armed at the base interval
    pub fn new(settings: Settings, seed: u64) -> Self {
        let state = GameState::new(&settings, seed);
        let mut palette_rng = Pcg32::seed_from_u64(seed ^ PALETTE_SEED_SALT);
        let palette = segment_colors(state.len(), &mut palette_rng);
        let mut timer = TickTimer::new();
        timer.arm(tick_interval_ms(0, &settings));
        Self {
            settings,
            state,
            timer,
            input: InputQueue::new(),
            palette,
            palette_rng,
            snapshot_pending: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn input(&self) -> &InputQueue {
        &self.input
    }

    pub fn palette(&self) -> &[[f32; 4]] {
        &self.palette
    }

    /// Queue a turn for a key press. Returns true if the key was used.
    /// Keys are ignored once the game is over.
    pub fn on_key(&mut self, key: &str) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        match direction_for_key(key) {
            Some(dir) => {
                self.input.push(dir);
                true
            }
            None => false,
        }
    }

    /// Feed elapsed frame time and run the ticks that came due.
    /// Returns the number of ticks run.
    pub fn update(&mut self, dt_ms: f64) -> u32 {
        self.timer.advance(dt_ms);

        let mut ticks = 0;
        while ticks < MAX_CATCHUP_TICKS && self.timer.take_due() {
            ticks += 1;
            let outcome = tick(&mut self.state, self.input.pop());
            match outcome {
                TickOutcome::Ate { food_placed } => {
                    let interval = tick_interval_ms(self.state.score, &self.settings);
                    self.timer.set_interval(interval);
                    log::debug!(
                        "Score {} (next tick in {} ms, food placed: {})",
                        self.state.score,
                        interval,
                        food_placed
                    );
                }
                TickOutcome::Crashed => {
                    self.timer.cancel();
                    self.input.clear();
                    self.snapshot_pending = self.settings.snapshot_on_game_over;
                    log::info!(
                        "Game over: score {}, length {}",
                        self.state.score,
                        self.state.len()
                    );
                }
                TickOutcome::Moved | TickOutcome::Blocked | TickOutcome::Halted => {}
            }
            self.palette = segment_colors(self.state.len(), &mut self.palette_rng);
            if !self.timer.is_armed() {
                break;
            }
        }

        if ticks == MAX_CATCHUP_TICKS {
            self.timer.discard_backlog();
        }
        ticks
    }

    /// True once after a game over that should show the final frame
    pub fn take_snapshot_request(&mut self) -> bool {
        std::mem::take(&mut self.snapshot_pending)
    }

    /// Reset the game and re-arm the tick timer
    pub fn restart(&mut self) {
        self.timer.cancel();
        self.state.reset();
        self.input.clear();
        self.palette = segment_colors(self.state.len(), &mut self.palette_rng);
        self.snapshot_pending = false;
        self.timer.arm(tick_interval_ms(self.state.score, &self.settings));
        log::info!("Game restarted");
    }
}

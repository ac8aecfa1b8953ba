//! Grid Snake - a wraparound Snake game for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, growth, collisions, food)
//! - `schedule`: Cancellable periodic tick timer
//! - `input`: Keyboard to direction mapping
//! - `session`: One play session (state, timer, queued input, colors)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Board, cadence and collision policy configuration

pub mod input;
pub mod renderer;
pub mod schedule;
pub mod session;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Board edge length in cells
    pub const BOARD_CELLS: u32 = 30;
    /// Cell edge length in pixels
    pub const CELL_SIZE: u32 = 20;

    /// Tick interval at score 0 (ms)
    pub const BASE_TICK_MS: u32 = 100;
    /// Foods eaten per speed step
    pub const SPEEDUP_EVERY: u32 = 5;
    /// Interval reduction per speed step (ms)
    pub const SPEEDUP_STEP_MS: u32 = 5;
    /// Fastest allowed tick interval (ms)
    pub const MIN_TICK_MS: u32 = 16;

    /// Maximum ticks run in one animation frame
    pub const MAX_CATCHUP_TICKS: u32 = 4;
    /// Longest frame delta fed to the tick timer (ms)
    pub const MAX_FRAME_MS: f64 = 250.0;

    /// Starting head position, in cells
    pub const START_HEAD: (i32, i32) = (5, 19);
    /// Starting snake length
    pub const START_LENGTH: usize = 3;
    /// Starting food position, in cells
    pub const START_FOOD: (i32, i32) = (20, 20);
    /// Smallest board that fits the start layout
    pub const MIN_BOARD_CELLS: u32 = 21;
    /// Largest board edge in cells
    pub const MAX_BOARD_CELLS: u32 = 1024;
    /// Largest board edge in CSS pixels
    pub const MAX_BOARD_PX: u32 = 16384;
}

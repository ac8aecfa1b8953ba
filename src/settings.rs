//! Game settings
//!
//! Read once at startup from the canvas `data-settings` attribute (JSON).
//! Missing fields fall back to the defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::CollisionPolicy;

/// Why a settings document was rejected
#[derive(Debug)]
pub enum SettingsError {
    /// Not valid JSON, or a field has the wrong type
    Parse(serde_json::Error),
    /// Board too small for the start layout
    BoardTooSmall { cells: u32, min: u32 },
    /// Board would not fit the cell grid or the canvas
    BoardTooLarge { cells: u32, cell_size: u32 },
    /// Cell size must be positive
    ZeroCellSize,
    /// Speed-up step count must be positive
    ZeroSpeedupEvery,
    /// Tick floor must be positive and no slower than the base interval
    BadTickRange { min_ms: u32, base_ms: u32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {}", e),
            SettingsError::BoardTooSmall { cells, min } => {
                write!(f, "board_cells is {}, must be at least {}", cells, min)
            }
            SettingsError::BoardTooLarge { cells, cell_size } => write!(
                f,
                "{} cells of {} px exceeds {} cells or {} px",
                cells, cell_size, MAX_BOARD_CELLS, MAX_BOARD_PX
            ),
            SettingsError::ZeroCellSize => write!(f, "cell_size must be positive"),
            SettingsError::ZeroSpeedupEvery => write!(f, "speedup_every must be positive"),
            SettingsError::BadTickRange { min_ms, base_ms } => write!(
                f,
                "min_tick_ms ({}) must be positive and not above base_tick_ms ({})",
                min_ms, base_ms
            ),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    /// Board edge length in cells (the board is square)
    pub board_cells: u32,
    /// Cell edge length in CSS pixels
    pub cell_size: u32,

    // === Cadence ===
    /// Tick interval at score 0 (ms)
    pub base_tick_ms: u32,
    /// Foods eaten per speed step
    pub speedup_every: u32,
    /// Interval reduction per speed step (ms)
    pub speedup_step_ms: u32,
    /// Fastest tick interval (ms)
    pub min_tick_ms: u32,

    // === Rules ===
    pub collision_policy: CollisionPolicy,
    /// Show the final frame in a dialog on game over
    pub snapshot_on_game_over: bool,
    /// Fixed run seed; the current time is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_cells: BOARD_CELLS,
            cell_size: CELL_SIZE,

            base_tick_ms: BASE_TICK_MS,
            speedup_every: SPEEDUP_EVERY,
            speedup_step_ms: SPEEDUP_STEP_MS,
            min_tick_ms: MIN_TICK_MS,

            collision_policy: CollisionPolicy::EndGame,
            snapshot_on_game_over: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.board_cells < MIN_BOARD_CELLS {
            return Err(SettingsError::BoardTooSmall {
                cells: self.board_cells,
                min: MIN_BOARD_CELLS,
            });
        }
        if self.cell_size == 0 {
            return Err(SettingsError::ZeroCellSize);
        }
        if self.board_cells > MAX_BOARD_CELLS
            || u64::from(self.board_cells) * u64::from(self.cell_size) > u64::from(MAX_BOARD_PX)
        {
            return Err(SettingsError::BoardTooLarge {
                cells: self.board_cells,
                cell_size: self.cell_size,
            });
        }
        if self.speedup_every == 0 {
            return Err(SettingsError::ZeroSpeedupEvery);
        }
        if self.min_tick_ms == 0 || self.min_tick_ms > self.base_tick_ms {
            return Err(SettingsError::BadTickRange {
                min_ms: self.min_tick_ms,
                base_ms: self.base_tick_ms,
            });
        }
        Ok(())
    }

    /// Board edge length in CSS pixels
    pub fn board_px(&self) -> u32 {
        self.board_cells.saturating_mul(self.cell_size)
    }

    /// Data attribute holding the JSON document
    const DATA_ATTRIBUTE: &'static str = "data-settings";

    /// Load settings from the canvas element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::Element) -> Self {
        match canvas.get_attribute(Self::DATA_ATTRIBUTE) {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", Self::DATA_ATTRIBUTE);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", Self::DATA_ATTRIBUTE, e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No {} on native, using defaults", Self::DATA_ATTRIBUTE);
        Self::default()
    }
}

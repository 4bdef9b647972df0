//! Life Grid - a deterministic cellular automaton engine
//!
//! Core modules:
//! - `sim`: Grid, rules, patterns and the simulation controller
//! - `settings`: JSON-backed configuration
//!
//! Rendering, input polling and frame pacing belong to the driver. The engine
//! only exposes the calls a driver makes each frame.

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{Cell, FrameInput, Grid, GridError, Pattern, Rule, Simulation, Status};

/// Default configuration constants
pub mod consts {
    /// Grid size of the classic 800x600 window with 10 px cells
    pub const GRID_WIDTH: usize = 80;
    pub const GRID_HEIGHT: usize = 60;

    /// Largest grid (in cells) that will be allocated
    pub const MAX_CELLS: usize = 1 << 26;

    /// Live fraction of the fill done at startup
    pub const INITIAL_DENSITY: f64 = 0.25;
    /// Live fraction used by the randomize command
    pub const RANDOMIZE_DENSITY: f64 = 0.3;

    /// Default driver pacing
    pub const GENERATIONS_PER_SECOND: u32 = 10;

    pub const DEFAULT_SEED: u64 = 0x5EED_1234_ABCD_EF01;
}

//! Deterministic simulation module
//!
//! All automaton logic lives here. This module must stay pure and
//! deterministic:
//! - Seeded RNG only, supplied by the caller or the controller
//! - Every generation computed from a frozen snapshot
//! - No rendering, timing or platform dependencies

pub mod cell;
pub mod controller;
pub mod error;
pub mod grid;
pub mod pattern;
pub mod rule;

pub use cell::Cell;
pub use controller::{FrameInput, FrameReport, Simulation, Status};
pub use error::GridError;
pub use grid::Grid;
pub use pattern::Pattern;
pub use rule::{MAX_NEIGHBORS, Rule};

//! Simulation controller
//!
//! Owns the grid, the pause flag and the seeded RNG used for randomizing.
//! It has no timing of its own: the driver decides how often to call
//! [`Simulation::frame`] or [`Simulation::step`].

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::cell::Cell;
use super::error::GridError;
use super::grid::Grid;
use crate::consts::RANDOMIZE_DENSITY;
use crate::settings::Settings;

/// One-shot commands gathered by the driver for a single frame.
///
/// [`Simulation::frame`] applies them in a fixed order regardless of arrival:
/// pause toggle, randomize, clear, then cell toggles. A toggle sent in the
/// same frame as a randomize or clear therefore survives it.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Play/pause toggle
    pub toggle_pause: bool,
    /// Randomize the grid (then pause)
    pub randomize: bool,
    /// Kill every cell (then pause)
    pub clear: bool,
    /// Cells to flip, in grid coordinates
    pub toggles: Vec<(i32, i32)>,
}

/// What a frame did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Whether a generation was advanced
    pub stepped: bool,
    /// Toggles ignored because they were off-grid
    pub rejected_toggles: usize,
}

/// Snapshot for a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub generation: u64,
    pub alive: usize,
    pub paused: bool,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generation: {}  Alive: {}  {}",
            self.generation,
            self.alive,
            if self.paused { "PAUSED" } else { "RUNNING" }
        )
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    paused: bool,
    /// Seed the RNG stream was last reset with
    seed: u64,
    rng: Pcg32,
    randomize_density: f64,
}

impl Simulation {
    /// Wrap `grid` as-is. Starts paused, like the interactive program.
    pub fn new(grid: Grid, seed: u64) -> Self {
        Self {
            grid,
            paused: true,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            randomize_density: RANDOMIZE_DENSITY,
        }
    }

    /// Build and seed a simulation from settings
    pub fn from_settings(settings: &Settings) -> Result<Self, GridError> {
        settings.validate()?;
        let grid = Grid::with_rule(settings.width, settings.height, settings.rule)?;

        let mut sim = Self::new(grid, settings.seed);
        sim.randomize_density = settings.randomize_density;
        sim.seed(settings.initial_density)?;
        sim.paused = settings.start_paused;

        log::info!(
            "Simulation {}x{} ({}) seeded with {}: {} alive",
            settings.width,
            settings.height,
            settings.rule,
            settings.seed,
            sim.alive_count()
        );
        Ok(sim)
    }

    #[cfg(test)]
    fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn generation(&self) -> u64 {
        self.grid.generation()
    }

    pub fn alive_count(&self) -> usize {
        self.grid.alive_count()
    }

    pub fn get_cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.grid.get_cell(x, y)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::debug!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    /// Seed the RNG stream was last reset with
    pub fn rng_seed(&self) -> u64 {
        self.seed
    }

    /// Restart the RNG stream from `seed`
    pub fn reseed_rng(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
    }

    pub fn randomize_density(&self) -> f64 {
        self.randomize_density
    }

    pub fn set_randomize_density(&mut self, probability: f64) -> Result<(), GridError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(GridError::InvalidProbability(probability));
        }
        self.randomize_density = probability;
        Ok(())
    }

    /// Advance one generation, paused or not
    pub fn step(&mut self) {
        self.grid.step();
    }

    pub fn toggle(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        self.grid.toggle_cell(x, y)
    }

    /// Randomize from the controller's own RNG stream
    pub fn seed(&mut self, probability: f64) -> Result<(), GridError> {
        self.grid.seed_random(probability, &mut self.rng)
    }

    /// Randomize from a caller-supplied RNG
    pub fn seed_with<R: Rng>(&mut self, probability: f64, rng: &mut R) -> Result<(), GridError> {
        self.grid.seed_random(probability, rng)
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Randomize at the configured density and pause
    pub fn randomize(&mut self) {
        let density = self.randomize_density;
        if let Err(err) = self.seed(density) {
            log::warn!("Randomize skipped: {err}");
        }
        self.paused = true;
    }

    /// Run one driver frame: apply the commands, then step unless paused
    pub fn frame(&mut self, input: &FrameInput) -> FrameReport {
        let mut report = FrameReport::default();

        if input.toggle_pause {
            self.toggle_pause();
        }
        if input.randomize {
            self.randomize();
        }
        if input.clear {
            self.grid.clear();
            self.paused = true;
        }
        for &(x, y) in &input.toggles {
            if let Err(err) = self.grid.toggle_cell(x, y) {
                log::debug!("Ignored toggle: {err}");
                report.rejected_toggles += 1;
            }
        }

        if !self.paused {
            self.grid.step();
            report.stepped = true;
        }
        report
    }

    pub fn status(&self) -> Status {
        Status {
            generation: self.generation(),
            alive: self.alive_count(),
            paused: self.paused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Pattern;

    fn running(width: usize, height: usize) -> Simulation {
        let mut sim = Simulation::new(Grid::new(width, height).unwrap(), 7);
        sim.set_paused(false);
        sim
    }

    #[test]
    fn test_new_starts_paused() {
        let mut sim = Simulation::new(Grid::new(5, 5).unwrap(), 1);
        assert!(sim.is_paused());

        let report = sim.frame(&FrameInput::default());
        assert!(!report.stepped);
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn test_frame_steps_when_running() {
        let mut sim = running(5, 5);
        for (x, y) in [(1, 2), (2, 2), (3, 2)] {
            sim.toggle(x, y).unwrap();
        }

        let report = sim.frame(&FrameInput::default());
        assert!(report.stepped);
        assert!(sim.get_cell(2, 1).unwrap().is_alive());
        assert!(!sim.get_cell(1, 2).unwrap().is_alive());

        sim.frame(&FrameInput::default());
        assert_eq!(sim.generation(), 2);
        assert!(sim.get_cell(1, 2).unwrap().is_alive());
    }

    #[test]
    fn test_frame_pause_toggle() {
        let mut sim = running(4, 4);
        let pause = FrameInput {
            toggle_pause: true,
            ..Default::default()
        };

        let report = sim.frame(&pause);
        assert!(sim.is_paused());
        assert!(!report.stepped);

        let report = sim.frame(&pause);
        assert!(!sim.is_paused());
        assert!(report.stepped);
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn test_frame_clear_pauses() {
        let mut sim = running(6, 6);
        sim.seed(1.0).unwrap();
        sim.step();

        let report = sim.frame(&FrameInput {
            clear: true,
            ..Default::default()
        });
        assert!(!report.stepped);
        assert!(sim.is_paused());
        assert_eq!(sim.alive_count(), 0);
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn test_frame_randomize_pauses() {
        let mut sim = running(6, 6);
        sim.set_randomize_density(1.0).unwrap();
        sim.step();

        sim.frame(&FrameInput {
            randomize: true,
            ..Default::default()
        });
        assert!(sim.is_paused());
        assert_eq!(sim.alive_count(), 36);
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn test_frame_rejects_off_grid_toggles() {
        let mut sim = Simulation::new(Grid::new(3, 3).unwrap(), 0);
        let report = sim.frame(&FrameInput {
            toggles: vec![(1, 1), (3, 1), (-1, 0)],
            ..Default::default()
        });
        assert_eq!(report.rejected_toggles, 2);
        assert_eq!(sim.alive_count(), 1);
    }

    #[test]
    fn test_frame_toggles_after_clear() {
        let mut sim = running(4, 4);
        sim.seed(1.0).unwrap();
        let report = sim.frame(&FrameInput {
            clear: true,
            toggles: vec![(2, 2)],
            ..Default::default()
        });
        assert!(!report.stepped);
        assert_eq!(sim.alive_count(), 1);
        assert!(sim.get_cell(2, 2).unwrap().is_alive());
    }

    #[test]
    fn test_step_ignores_pause() {
        let mut sim = Simulation::new(Grid::new(4, 4).unwrap(), 0);
        assert!(sim.is_paused());
        sim.step();
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn test_toggle_keeps_generation() {
        let mut sim = running(4, 4);
        sim.step();
        sim.toggle(0, 0).unwrap();
        assert_eq!(sim.generation(), 1);
        assert!(sim.toggle(4, 0).is_err());
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Simulation::new(Grid::new(20, 15).unwrap(), 99999);
        let mut b = Simulation::new(Grid::new(20, 15).unwrap(), 99999);
        a.seed(0.35).unwrap();
        b.seed(0.35).unwrap();

        let inputs = [
            FrameInput {
                toggle_pause: true,
                ..Default::default()
            },
            FrameInput {
                toggles: vec![(3, 3), (4, 4)],
                ..Default::default()
            },
            FrameInput::default(),
            FrameInput {
                randomize: true,
                ..Default::default()
            },
            FrameInput {
                toggle_pause: true,
                ..Default::default()
            },
        ];
        for input in &inputs {
            a.frame(input);
            b.frame(input);
            assert_eq!(a.grid(), b.grid());
            assert_eq!(a.status(), b.status());
        }
    }

    #[test]
    fn test_reseed_rng_replays_stream() {
        let mut sim = Simulation::new(Grid::new(10, 10).unwrap(), 5);
        sim.seed(0.5).unwrap();
        let first = sim.grid().clone();

        sim.seed(0.5).unwrap();
        sim.reseed_rng(5);
        sim.seed(0.5).unwrap();
        assert_eq!(sim.grid(), &first);
        assert_eq!(sim.rng_seed(), 5);
    }

    #[test]
    fn test_seed_with_external_rng() {
        let mut sim = Simulation::new(Grid::new(8, 8).unwrap(), 0);
        let mut grid = Grid::new(8, 8).unwrap();
        sim.seed_with(0.5, &mut Pcg32::seed_from_u64(11)).unwrap();
        grid.seed_random(0.5, &mut Pcg32::seed_from_u64(11)).unwrap();
        assert_eq!(sim.grid(), &grid);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            width: 12,
            height: 8,
            initial_density: 0.0,
            ..Settings::default()
        };
        let mut sim = Simulation::from_settings(&settings).unwrap();
        assert_eq!((sim.width(), sim.height()), (12, 8));
        assert!(sim.is_paused());
        assert_eq!(sim.alive_count(), 0);

        sim.set_paused(false);
        let mut grid = Grid::new(12, 8).unwrap();
        grid.stamp(&Pattern::block(), 4, 4).unwrap();
        for (x, y, _) in grid.cells().filter(|(_, _, cell)| cell.is_alive()) {
            sim.toggle(x, y).unwrap();
        }
        sim.frame(&FrameInput::default());
        for (x, y, cell) in grid.cells() {
            assert_eq!(sim.get_cell(x, y), Some(cell), "cell ({x}, {y})");
        }
    }

    #[test]
    fn test_from_settings_rejects_bad_config() {
        let settings = Settings {
            width: 0,
            ..Settings::default()
        };
        assert!(matches!(
            Simulation::from_settings(&settings),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_status_line() {
        let mut sim = Simulation::new(Grid::new(3, 3).unwrap(), 0);
        sim.toggle(1, 1).unwrap();
        assert_eq!(sim.status().to_string(), "Generation: 0  Alive: 1  PAUSED");
        sim.set_paused(false);
        sim.frame(&FrameInput::default());
        assert_eq!(sim.status().to_string(), "Generation: 1  Alive: 0  RUNNING");
    }
}

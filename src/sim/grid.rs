//! Bounded two-dimensional cell grid
//!
//! Cells live in two same-shape row-major buffers. A step evaluates every
//! cell of the next generation from the current buffer only, then swaps the
//! buffers. Readers never see a half-updated generation because nothing is
//! observable between the evaluation and the swap.
//!
//! Neighbors beyond the edges are dead: there is no wraparound.

use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::cell::Cell;
use super::error::GridError;
use super::pattern::Pattern;
use super::rule::Rule;
use crate::consts::MAX_CELLS;

/// Moore neighborhood offsets
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    rule: Rule,
    /// Committed generation
    current: Vec<bool>,
    /// Next generation; only meaningful inside `step`
    next: Vec<bool>,
    generation: u64,
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.rule == other.rule
            && self.generation == other.generation
            && self.current == other.current
    }
}

impl Eq for Grid {}

impl Grid {
    /// Create an all-dead grid running Conway's rule
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        Self::with_rule(width, height, Rule::conway())
    }

    /// Create an all-dead grid running `rule`
    pub fn with_rule(width: usize, height: usize, rule: Rule) -> Result<Self, GridError> {
        let len = Self::check_dimensions(width, height)?;

        log::debug!("Created {width}x{height} grid with rule {rule}");
        Ok(Self {
            width,
            height,
            rule,
            current: vec![false; len],
            next: vec![false; len],
            generation: 0,
        })
    }

    /// Cell count of a `width` x `height` grid, if one may be built.
    ///
    /// Each side must be non-zero and fit in `i32`; the total is capped at
    /// [`MAX_CELLS`].
    pub fn check_dimensions(width: usize, height: usize) -> Result<usize, GridError> {
        let max_side = i32::MAX as usize;
        if width == 0 || height == 0 || width > max_side || height > max_side {
            return Err(GridError::InvalidDimensions { width, height });
        }
        width
            .checked_mul(height)
            .filter(|&len| len <= MAX_CELLS)
            .ok_or(GridError::InvalidDimensions { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// Completed steps since the last clear or seed
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Row-major index of `(x, y)`, or `None` if off-grid
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    fn out_of_range(&self, x: i32, y: i32) -> GridError {
        GridError::OutOfRange {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    fn checked_index(&self, x: i32, y: i32) -> Result<usize, GridError> {
        self.index(x, y).ok_or_else(|| self.out_of_range(x, y))
    }

    /// Cell state at `(x, y)`; `None` off-grid
    pub fn get_cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| Cell::from(self.current[i]))
    }

    /// Whether `(x, y)` is alive; off-grid positions are dead
    pub fn is_alive(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.current[i])
    }

    /// Live Moore neighbors of `(x, y)`; `None` off-grid
    pub fn count_alive_neighbors(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|i| {
            count_neighbors(&self.current, self.width, self.height, i % self.width, i / self.width)
        })
    }

    /// Number of live cells
    pub fn alive_count(&self) -> usize {
        self.current.iter().filter(|&&alive| alive).count()
    }

    /// Every cell with its position, row-major
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        let width = self.width;
        self.current
            .iter()
            .enumerate()
            .map(move |(i, &alive)| ((i % width) as i32, (i / width) as i32, Cell::from(alive)))
    }

    /// Positions of live cells, row-major
    pub fn live_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells()
            .filter(|(_, _, cell)| cell.is_alive())
            .map(|(x, y, _)| (x, y))
    }

    /// Advance one synchronous generation
    pub fn step(&mut self) {
        self.evaluate_next();
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_next(&mut self) {
        let (width, height, rule) = (self.width, self.height, self.rule);
        let current = &self.current;
        for (y, row) in self.next.chunks_mut(width).enumerate() {
            evaluate_row(current, width, height, &rule, y, row);
        }
    }

    // Each worker writes only its own rows of `next`; the join at the end of
    // `for_each` completes before `step` swaps the buffers.
    #[cfg(feature = "parallel")]
    fn evaluate_next(&mut self) {
        let (width, height, rule) = (self.width, self.height, self.rule);
        let current = &self.current;
        self.next
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| evaluate_row(current, width, height, &rule, y, row));
    }

    /// Step, evaluating cells in the given index order
    #[cfg(test)]
    fn step_in_order(&mut self, order: &[usize]) {
        for &i in order {
            let (x, y) = (i % self.width, i / self.width);
            let n = count_neighbors(&self.current, self.width, self.height, x, y);
            self.next[i] = self.rule.next_state(self.current[i], n);
        }
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
    }

    /// Flip a single cell. Generation is unchanged.
    pub fn toggle_cell(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        let i = self.checked_index(x, y)?;
        let mut cell = Cell::new(self.current[i]);
        cell.toggle();
        self.current[i] = cell.is_alive();
        self.next[i] = cell.is_alive();
        Ok(())
    }

    /// Set a single cell. Generation is unchanged.
    pub fn set_cell(&mut self, x: i32, y: i32, alive: bool) -> Result<(), GridError> {
        let i = self.checked_index(x, y)?;
        self.current[i] = alive;
        self.next[i] = alive;
        Ok(())
    }

    /// Bring `pattern`'s live cells to life with its top-left corner at
    /// `(x, y)`. Nothing changes if any cell would land off-grid.
    pub fn stamp(&mut self, pattern: &Pattern, x: i32, y: i32) -> Result<(), GridError> {
        let indices = pattern
            .cells
            .iter()
            .map(|&(dx, dy)| {
                let (px, py) = (x.saturating_add(dx), y.saturating_add(dy));
                self.checked_index(px, py)
            })
            .collect::<Result<Vec<_>, _>>()?;

        for i in indices {
            self.current[i] = true;
            self.next[i] = true;
        }
        Ok(())
    }

    /// Randomize every cell: alive with `probability`, drawn in row-major
    /// order from `rng`. Resets the generation counter.
    pub fn seed_random<R: Rng>(&mut self, probability: f64, rng: &mut R) -> Result<(), GridError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(GridError::InvalidProbability(probability));
        }
        for alive in self.current.iter_mut() {
            *alive = rng.random::<f64>() < probability;
        }
        self.next.copy_from_slice(&self.current);
        self.generation = 0;

        log::debug!(
            "Seeded {}x{} grid at p={probability}: {} alive",
            self.width,
            self.height,
            self.alive_count()
        );
        Ok(())
    }

    /// Kill every cell and reset the generation counter
    pub fn clear(&mut self) {
        self.current.fill(false);
        self.next.fill(false);
        self.generation = 0;
    }
}

/// Live Moore neighbors of in-range `(x, y)` in a row-major buffer
#[inline]
fn count_neighbors(cells: &[bool], width: usize, height: usize, x: usize, y: usize) -> u8 {
    let mut count = 0;
    for (dx, dy) in NEIGHBOR_OFFSETS {
        let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
            continue;
        };
        if nx < width && ny < height && cells[ny * width + nx] {
            count += 1;
        }
    }
    count
}

/// Fill row `y` of the next generation from the frozen `current` buffer
fn evaluate_row(
    current: &[bool],
    width: usize,
    height: usize,
    rule: &Rule,
    y: usize,
    row: &mut [bool],
) {
    for (x, slot) in row.iter_mut().enumerate() {
        let n = count_neighbors(current, width, height, x, y);
        *slot = rule.next_state(current[y * width + x], n);
    }
}

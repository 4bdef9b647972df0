//! Named starting shapes
//!
//! Offsets are relative to the pattern's top-left corner, `y` growing down.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: Vec<(i32, i32)>,
}

impl Pattern {
    pub fn new(name: &'static str, cells: Vec<(i32, i32)>) -> Self {
        Self { name, cells }
    }

    /// 2x2 still life
    pub fn block() -> Self {
        Self::new("block", vec![(0, 0), (1, 0), (0, 1), (1, 1)])
    }

    /// Horizontal period-2 oscillator
    pub fn blinker() -> Self {
        Self::new("blinker", vec![(0, 0), (1, 0), (2, 0)])
    }

    /// Smallest spaceship, travels down-right
    pub fn glider() -> Self {
        Self::new("glider", vec![(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)])
    }

    /// Period-2 oscillator
    pub fn toad() -> Self {
        Self::new("toad", vec![(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)])
    }

    /// Period-2 oscillator made of two diagonal blocks
    pub fn beacon() -> Self {
        Self::new("beacon", vec![(0, 0), (1, 0), (0, 1), (3, 2), (2, 3), (3, 3)])
    }

    /// Bounding-box width
    pub fn width(&self) -> i32 {
        self.cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0)
    }

    /// Bounding-box height
    pub fn height(&self) -> i32 {
        self.cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0)
    }
}

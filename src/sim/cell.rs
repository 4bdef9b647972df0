//! Per-position cell state

/// State of a single grid position.
///
/// `pending` is scratch for the next generation and only means something
/// while a step is being evaluated. Outside a step it always equals `alive`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    alive: bool,
    pending: bool,
}

impl Cell {
    pub fn new(alive: bool) -> Self {
        Self {
            alive,
            pending: alive,
        }
    }

    /// Committed state
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Record the next-generation state without changing `is_alive()`
    #[inline]
    pub fn set_pending(&mut self, next_alive: bool) {
        self.pending = next_alive;
    }

    /// Make the pending state the committed one
    #[inline]
    pub fn commit(&mut self) {
        self.alive = self.pending;
    }

    /// Flip immediately, keeping scratch in sync so a later step is not skewed
    pub fn toggle(&mut self) {
        self.alive = !self.alive;
        self.pending = self.alive;
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        Self::new(alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dead() {
        assert!(!Cell::default().is_alive());
    }

    #[test]
    fn test_from_bool_is_committed() {
        let mut cell = Cell::from(true);
        assert!(cell.is_alive());
        // Scratch starts equal to the committed state
        cell.commit();
        assert!(cell.is_alive());
    }

    #[test]
    fn test_pending_invisible_until_commit() {
        let mut cell = Cell::new(false);
        cell.set_pending(true);
        assert!(!cell.is_alive());

        cell.commit();
        assert!(cell.is_alive());
    }

    #[test]
    fn test_toggle_resets_scratch() {
        let mut cell = Cell::new(false);
        cell.set_pending(false);
        cell.toggle();
        assert!(cell.is_alive());

        // A stale pending value must not survive a toggle
        cell.commit();
        assert!(cell.is_alive());

        cell.toggle();
        cell.commit();
        assert!(!cell.is_alive());
    }
}

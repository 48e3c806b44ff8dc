//! Relative-offset view of the occupancy store around one cell.

use crate::cell::Cell;
use crate::grid::Grid;

/// Read-only probe centered on `origin`. Out-of-bounds offsets read as free.
#[derive(Debug, Clone, Copy)]
pub struct Neighborhood<'a> {
    pub grid: &'a Grid,
    pub origin: Cell,
}

impl<'a> Neighborhood<'a> {
    pub fn new(grid: &'a Grid, origin: Cell) -> Self {
        Self { grid, origin }
    }

    #[must_use]
    pub fn occupied(&self, dc: i32, dr: i32) -> bool {
        self.grid.is_occupied(self.origin.offset(dc, dr))
    }

    /// Held directly above and on at least one upper diagonal: the cell is
    /// buried under a pile and cannot move.
    #[must_use]
    pub fn is_buried(&self) -> bool {
        self.occupied(0, -1) && (self.occupied(-1, -1) || self.occupied(1, -1))
    }
}

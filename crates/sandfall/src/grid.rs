//! Occupancy store: which cells are taken, and by which particle.

use crate::cell::Cell;

/// Dense owner table plus the authoritative cell of every particle id.
///
/// Out-of-bounds cells are never occupied. Culled particles are pinned to the
/// sentinel cell and take no part in collision checks.
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    owners: Vec<Option<u32>>,
    positions: Vec<Cell>,
    sentinel: Cell,
    occupied: usize,
}

impl Grid {
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            owners: vec![None; width as usize * height as usize],
            positions: Vec::new(),
            sentinel: Cell::sentinel(width, height),
            occupied: 0,
        }
    }

    #[must_use]
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.col >= 0 && cell.col < self.width && cell.row >= 0 && cell.row < self.height
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.is_in_bounds(cell)
            .then(|| cell.row as usize * self.width as usize + cell.col as usize)
    }

    #[must_use]
    pub fn owner(&self, cell: Cell) -> Option<u32> {
        self.index(cell).and_then(|i| self.owners[i])
    }

    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.owner(cell).is_some()
    }

    #[must_use]
    pub fn sentinel(&self) -> Cell {
        self.sentinel
    }

    /// Current cell of particle `id`.
    #[must_use]
    pub fn cell_of(&self, id: u32) -> Option<Cell> {
        self.positions.get(id as usize).copied()
    }

    #[must_use]
    pub fn is_culled(&self, id: u32) -> bool {
        self.cell_of(id).is_none_or(|cell| cell == self.sentinel)
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Cells currently owned, kept up to date by [`Grid::set_cell`].
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Allocate the next id at `cell`. The caller checks vacancy first; an
    /// out-of-bounds or taken cell leaves the new id at the sentinel.
    pub fn insert(&mut self, cell: Cell) -> u32 {
        let id = self.positions.len() as u32;
        self.positions.push(self.sentinel);
        self.set_cell(id, cell);
        id
    }

    /// Move particle `id` to `cell`, releasing its previous cell.
    ///
    /// Writing onto a cell held by another particle is a logic error: it
    /// panics in debug builds and is dropped in release. Returns whether the
    /// write happened.
    pub fn set_cell(&mut self, id: u32, cell: Cell) -> bool {
        let Some(prev) = self.cell_of(id) else {
            debug_assert!(false, "set_cell on unknown particle {id}");
            log::warn!("set_cell on unknown particle {id}");
            return false;
        };
        if prev == cell {
            return true;
        }

        let target = self.index(cell);
        if let Some(i) = target {
            if let Some(other) = self.owners[i].filter(|&other| other != id) {
                debug_assert!(false, "particle {id} moving onto {cell} held by {other}");
                log::warn!("rejected move of particle {id} onto {cell} held by {other}");
                return false;
            }
        }

        if let Some(i) = self.index(prev) {
            if self.owners[i] == Some(id) {
                self.owners[i] = None;
                self.occupied -= 1;
            }
        }
        match target {
            Some(i) => {
                self.owners[i] = Some(id);
                self.occupied += 1;
                self.positions[id as usize] = cell;
            }
            None => self.positions[id as usize] = self.sentinel,
        }
        true
    }

    /// Iterate `(id, cell)` in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Cell)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map(|(id, &cell)| (id as u32, cell))
    }
}

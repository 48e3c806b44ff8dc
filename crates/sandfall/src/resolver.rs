//! Per-particle motion resolution: fall, settle, or slide.
//!
//! A particle's intended move is its position plus velocity, snapped to the
//! grid. The resolver only ever hands back a cell that is free (or the
//! particle's own), so committing its answer keeps the occupancy map
//! collision-free. Fast particles may jump over occupied cells on the way
//! to a free target; only the target itself is checked.

use rand::RngCore;

use crate::api::Neighborhood;
use crate::cell::Cell;
use crate::config::SimConfig;
use crate::grid::Grid;
use crate::particle::Particle;

/// Where a particle ends up this tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Resolution {
    pub cell: Cell,
    pub falling: bool,
}

impl Resolution {
    const fn moving(cell: Cell) -> Self {
        Self { cell, falling: true }
    }

    const fn resting(cell: Cell) -> Self {
        Self { cell, falling: false }
    }
}

/// Which horizontal neighbour a blocked particle tries first.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// One random bit decides the side.
    pub fn pick<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        if rng.next_u32() & 1 == 0 {
            Self::Left
        } else {
            Self::Right
        }
    }

    #[must_use]
    pub const fn dx(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }

    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Advance `p` by one tick against `grid`.
///
/// Mutates only `p`'s velocity; committing the returned cell to the grid and
/// to `p`'s position is up to the caller. A grain too slow to leave its cell
/// this tick comes back on its own cell, still falling while it has any
/// velocity, so the caller can let it drift inside the cell.
pub fn step<R: RngCore + ?Sized>(
    p: &mut Particle,
    grid: &Grid,
    config: &SimConfig,
    rng: &mut R,
) -> Resolution {
    p.vy += config.gravity;
    if let Some(cap) = config.max_fall_speed {
        p.vy = p.vy.min(cap);
    }

    let (w, h) = (config.screen_width as f32, config.screen_height as f32);
    if p.x < 0.0 || p.x >= w || p.y >= h {
        return Resolution::resting(grid.sentinel());
    }

    let size = config.cell_size();
    let init = Cell::snap(p.x, p.y, size);
    let mut target = Cell::snap(p.x + p.vx, p.y + p.vy, size);
    if target.col < 0 || target.col >= grid.width {
        // Left the screen sideways.
        return Resolution::resting(grid.sentinel());
    }
    if target.row < 0 {
        target.row = 0;
        p.vy = p.vy.max(0.0);
    }
    let bottom = Cell::new(target.col, grid.height - 1);

    if target.row >= bottom.row && !grid.is_occupied(bottom) {
        p.stop();
        return Resolution::resting(bottom);
    }

    if init == bottom || Neighborhood::new(grid, init).is_buried() {
        p.stop();
        return Resolution::resting(init);
    }

    if target == init {
        return if p.vx == 0.0 && p.vy == 0.0 {
            Resolution::resting(init)
        } else {
            Resolution::moving(init)
        };
    }

    if target.row < bottom.row && !grid.is_occupied(target) {
        return Resolution::moving(target);
    }

    p.vx = 0.0;
    p.vy = config.settle_bias;
    slide(grid, init, target, bottom.row, rng).map_or(Resolution::resting(init), Resolution::moving)
}

/// Blocked target: look for room above it in the same column, back up
/// towards the particle, then one column to either side.
fn slide<R: RngCore + ?Sized>(
    grid: &Grid,
    init: Cell,
    target: Cell,
    floor: i32,
    rng: &mut R,
) -> Option<Cell> {
    let mut probe_row = target.row.min(floor);
    for row in ((init.row + 1)..target.row).rev() {
        if row > floor {
            continue;
        }
        probe_row = row;
        let cell = Cell::new(target.col, row);
        if !grid.is_occupied(cell) {
            return Some(cell);
        }
    }

    let first = Side::pick(rng);
    [first, first.flip()]
        .into_iter()
        .map(|side| Cell::new(target.col + side.dx(), probe_row))
        .filter(|&cell| grid.is_in_bounds(cell))
        .find(|&cell| !grid.is_occupied(cell))
}

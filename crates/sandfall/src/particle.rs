//! Particle state and the click spawner.

use crate::cell::Cell;
use crate::config::SimConfig;
use crate::grid::Grid;

/// Kinematic state of one grain. Position and velocity are in pixels;
/// positive y points down.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Particle {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub falling: bool,
}

impl Particle {
    #[must_use]
    pub fn new(id: u32, x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self {
            id,
            x,
            y,
            vx,
            vy,
            falling: true,
        }
    }

    /// Particle resting at the center of `cell`.
    #[must_use]
    pub fn at_cell(id: u32, cell: Cell, size: i32) -> Self {
        let (x, y) = cell.center(size);
        Self {
            falling: false,
            ..Self::new(id, x as f32, y as f32, 0.0, 0.0)
        }
    }

    pub fn stop(&mut self) {
        self.vx = 0.0;
        self.vy = 0.0;
    }

    /// Snap the continuous position onto the center of `cell`.
    pub fn place(&mut self, cell: Cell, size: i32) {
        let (x, y) = cell.center(size);
        self.x = x as f32;
        self.y = y as f32;
    }
}

/// Drop a cluster of four grains around `(x, y)`: one column to each side,
/// each side a pair stacked one row apart with different upward pops.
///
/// A grain whose cell is off-screen or already taken is not created. New
/// grains are appended to `particles` and registered in `grid`; returns how
/// many were created.
pub fn spawn(
    particles: &mut Vec<Particle>,
    grid: &mut Grid,
    config: &SimConfig,
    x: f32,
    y: f32,
) -> usize {
    let size = config.cell_size();
    let mut created = 0;
    for side in [1.0_f32, -1.0] {
        for (i, &vy) in config.spawn_speeds_y.iter().enumerate() {
            let px = x + side * size;
            let py = y + i as f32 * size;
            let cell = Cell::snap(px, py, size);
            if !grid.is_in_bounds(cell) || grid.is_occupied(cell) {
                continue;
            }
            let id = grid.insert(cell);
            debug_assert_eq!(id as usize, particles.len());
            particles.push(Particle::new(id, px, py, side * config.spawn_speed_x, vy));
            created += 1;
        }
    }
    log::debug!("spawned {created} particles at ({x}, {y})");
    created
}

//! Falling sand particle simulation.
//!
//! Clicks drop clusters of grains that fall under gravity, collide on a
//! pixel grid, and pile up. [`Simulation`] owns the occupancy [`Grid`] and
//! every [`Particle`]; [`Universe`] is the WASM surface over it.

pub mod api;
pub mod cell;
pub mod config;
pub mod grid;
pub mod particle;
pub mod render;
pub mod resolver;
pub mod universe;


use cell::Cell;
pub use config::{ConfigError, SimConfig, DEFAULT_PARTICLE_SIZE};
pub use grid::Grid;
pub use particle::Particle;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use render::{RenderParticle, Status};
pub use universe::Universe;

/// Particles, their occupancy grid, and the per-frame driver.
#[derive(Debug)]
pub struct Simulation {
    pub config: SimConfig,
    pub grid: Grid,
    pub particles: Vec<Particle>,
    rng: SmallRng,
    pending_spawn: Option<(f32, f32)>,
    cursor: Option<(i32, i32)>,
    any_falling: bool,
    tick_count: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Default parameters on a `width × height` px screen, grown to at least
    /// one cell in each direction.
    #[must_use]
    pub fn with_screen(width: u32, height: u32) -> Self {
        let size = DEFAULT_PARTICLE_SIZE;
        Self::build(SimConfig::with_screen(width.max(size), height.max(size)))
    }

    fn build(config: SimConfig) -> Self {
        let grid = Grid::new(config.grid_width(), config.grid_height());
        log::info!(
            "simulation {}x{} px, {}x{} cells of {} px",
            config.screen_width,
            config.screen_height,
            grid.width,
            grid.height,
            config.particle_size
        );
        Self {
            rng: SmallRng::seed_from_u64(config.seed),
            config,
            grid,
            particles: Vec::new(),
            pending_spawn: None,
            cursor: None,
            any_falling: false,
            tick_count: 0,
        }
    }

    /// Spawn input held at screen point `(x, y)` this frame. Consumed by the
    /// next `tick`.
    pub fn on_click_held(&mut self, x: f32, y: f32) {
        self.pending_spawn = Some((x, y));
        self.on_cursor(x as i32, y as i32);
    }

    pub fn on_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Some((x, y));
    }

    /// Advance one frame.
    ///
    /// Particles resolve in ascending id order and each commits its cell
    /// before the next one looks at the grid, so later particles see earlier
    /// moves from the same tick.
    pub fn tick(&mut self) {
        let size = self.config.particle_size as i32;
        let cell_size = self.config.cell_size();
        let mut any_falling = false;
        let mut moved = 0usize;

        for p in &mut self.particles {
            if self.grid.is_culled(p.id) {
                continue;
            }
            let before = self.grid.cell_of(p.id);
            let res = resolver::step(p, &self.grid, &self.config, &mut self.rng);
            if !self.grid.set_cell(p.id, res.cell) {
                p.falling = false;
                continue;
            }
            let (x, y) = (p.x + p.vx, p.y + p.vy);
            if res.falling && before == Some(res.cell) && Cell::snap(x, y, cell_size) == res.cell {
                // Too slow to cross a cell boundary yet; keep the sub-cell offset.
                p.x = x;
                p.y = y;
            } else {
                p.place(res.cell, size);
            }
            p.falling = res.falling;
            any_falling |= res.falling;
            if before != Some(res.cell) {
                moved += 1;
            }
        }

        if let Some((x, y)) = self.pending_spawn.take() {
            self.try_spawn(x, y);
        }

        self.any_falling = any_falling;
        self.tick_count += 1;
        log::trace!(
            "tick {}: {} particles, {} moved, falling={}",
            self.tick_count,
            self.particles.len(),
            moved,
            any_falling
        );
    }

    fn try_spawn(&mut self, x: f32, y: f32) -> usize {
        let cell = Cell::snap(x, y, self.config.cell_size());
        if !self.grid.is_in_bounds(cell) || self.grid.is_occupied(cell) {
            log::debug!("ignored spawn at ({x}, {y})");
            return 0;
        }
        particle::spawn(&mut self.particles, &mut self.grid, &self.config, x, y)
    }

    /// Spawn a cluster right away, bypassing the per-frame trigger.
    pub fn spawn_at(&mut self, x: f32, y: f32) -> usize {
        self.try_spawn(x, y)
    }

    /// Place one resting particle on `cell`. `None` if the cell is off-grid
    /// or taken.
    pub fn add_particle(&mut self, cell: Cell) -> Option<u32> {
        if !self.grid.is_in_bounds(cell) || self.grid.is_occupied(cell) {
            return None;
        }
        let id = self.grid.insert(cell);
        let size = self.config.particle_size as i32;
        self.particles.push(Particle::at_cell(id, cell, size));
        Some(id)
    }

    /// Whether any particle moved freely or slid during the last tick.
    #[must_use]
    pub fn any_falling(&self) -> bool {
        self.any_falling
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Total particles spawned, culled ones included.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.grid.occupied_count()
    }

    /// Cell of every on-screen particle, in spawn order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, Cell)> + '_ {
        self.grid.iter().filter(|&(id, _)| !self.grid.is_culled(id))
    }

    #[must_use]
    pub fn renderable_particles(&self) -> Vec<RenderParticle> {
        let size = self.config.particle_size as i32;
        self.cells()
            .map(|(id, cell)| {
                let (x, y) = cell.center(size);
                RenderParticle {
                    x,
                    y,
                    hue: render::hue(id, self.config.color_period),
                    id,
                }
            })
            .collect()
    }

    #[must_use]
    pub fn status(&self) -> Status {
        Status {
            cursor: self.cursor,
            particle_count: self.particles.len(),
            falling: self.any_falling,
        }
    }
}

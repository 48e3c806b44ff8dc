//! Grid cell coordinates.

use std::fmt;

/// One `particle_size × particle_size` slot of the grid, addressed by column
/// and row. Row 0 is the top of the screen.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

impl Cell {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Cell containing the continuous point `(x, y)`.
    #[must_use]
    pub fn snap(x: f32, y: f32, size: f32) -> Self {
        Self {
            col: (x / size).floor() as i32,
            row: (y / size).floor() as i32,
        }
    }

    /// Off-screen marker for culled particles: centered horizontally, one
    /// row below the floor.
    #[must_use]
    pub const fn sentinel(grid_width: i32, grid_height: i32) -> Self {
        Self {
            col: grid_width / 2,
            row: grid_height + 1,
        }
    }

    #[must_use]
    pub const fn offset(self, dc: i32, dr: i32) -> Self {
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }

    /// Pixel center, rounded down the way the particle sprite is placed.
    #[must_use]
    pub const fn center(self, size: i32) -> (i32, i32) {
        (self.col * size + size / 2, self.row * size + size / 2)
    }

    /// Inverse of `center` for pixel-center coordinates.
    #[must_use]
    pub const fn from_center(x: i32, y: i32, size: i32) -> Self {
        Self {
            col: x.div_euclid(size),
            row: y.div_euclid(size),
        }
    }
}

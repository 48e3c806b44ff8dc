//! Data handed to the front end: sprites to draw and the debug overlay.

use std::fmt;

use serde::Serialize;

/// One sprite: pixel center of the particle's cell plus a hue hint.
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
pub struct RenderParticle {
    pub x: i32,
    pub y: i32,
    /// Hue in `[0, 1)`, cycling once every `color_period` ids.
    pub hue: f32,
    pub id: u32,
}

/// Hue rotation for particle `id`.
#[must_use]
pub fn hue(id: u32, period: u32) -> f32 {
    let period = period.max(1);
    (id % period) as f32 / period as f32
}

/// Debug overlay contents.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Status {
    pub cursor: Option<(i32, i32)>,
    pub particle_count: usize,
    pub falling: bool,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cursor {
            Some((x, y)) => writeln!(f, "({x}, {y})")?,
            None => writeln!(f, "(-, -)")?,
        }
        writeln!(f, "Particles: {}", self.particle_count)?;
        write!(
            f,
            "State: {}",
            if self.falling { "falling" } else { "settled" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hue_wraps_every_period() {
        assert_eq!(hue(0, 3000), 0.0);
        assert_eq!(hue(1500, 3000), 0.5);
        assert_eq!(hue(3000, 3000), 0.0);
        assert_eq!(hue(7, 0), 0.0);
    }

    #[test]
    fn status_text() {
        let status = Status {
            cursor: Some((12, 40)),
            particle_count: 8,
            falling: true,
        };
        assert_eq!(status.to_string(), "(12, 40)\nParticles: 8\nState: falling");

        let idle = Status {
            cursor: None,
            particle_count: 0,
            falling: false,
        };
        assert_eq!(idle.to_string(), "(-, -)\nParticles: 0\nState: settled");
    }

    #[test]
    fn status_serializes() {
        let status = Status {
            cursor: Some((1, 2)),
            particle_count: 3,
            falling: false,
        };
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(
            json,
            r#"{"cursor":[1,2],"particle_count":3,"falling":false}"#
        );
    }

    proptest! {
        #[test]
        fn prop_hue_in_unit_range(id in any::<u32>(), period in 1u32..100_000) {
            let h = hue(id, period);
            prop_assert!((0.0..1.0).contains(&h));
        }
    }
}

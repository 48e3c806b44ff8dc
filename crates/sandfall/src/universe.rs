//! WASM surface driven by the browser front end.

use wasm_bindgen::prelude::*;

use crate::config::{ConfigError, SimConfig};
use crate::Simulation;

/// Floats per particle in [`Universe::render_buffer`]: `x, y, hue, id`.
pub const RENDER_STRIDE: usize = 4;

#[wasm_bindgen]
#[derive(Debug)]
pub struct Universe {
    sim: Simulation,
}

#[wasm_bindgen]
impl Universe {
    /// Default parameters on a `width × height` px screen.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            sim: Simulation::with_screen(width, height),
        }
    }

    /// Build from a JSON config object; unknown fields are ignored and
    /// missing ones take their defaults.
    pub fn with_config(json: &str) -> Result<Universe, JsValue> {
        Self::from_json(json).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    pub fn on_click_held(&mut self, x: f32, y: f32) {
        self.sim.on_click_held(x, y);
    }

    pub fn on_cursor(&mut self, x: i32, y: i32) {
        self.sim.on_cursor(x, y);
    }

    pub fn tick(&mut self) {
        self.sim.tick();
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.sim.config.screen_width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.sim.config.screen_height
    }

    #[must_use]
    pub fn particle_size(&self) -> u32 {
        self.sim.config.particle_size
    }

    #[must_use]
    pub fn particle_count(&self) -> u32 {
        self.sim.particle_count() as u32
    }

    #[must_use]
    pub fn any_falling(&self) -> bool {
        self.sim.any_falling()
    }

    /// Packed `x, y, hue, id` for every on-screen particle.
    #[must_use]
    pub fn render_buffer(&self) -> Vec<f32> {
        let sprites = self.sim.renderable_particles();
        let mut buf = Vec::with_capacity(sprites.len() * RENDER_STRIDE);
        for s in sprites {
            buf.extend_from_slice(&[s.x as f32, s.y as f32, s.hue, s.id as f32]);
        }
        buf
    }

    #[must_use]
    pub fn status_text(&self) -> String {
        self.sim.status().to_string()
    }

    /// Status overlay as a JSON object.
    ///
    /// `Status` holds only plain numbers and a bool, so serialization cannot
    /// fail; a failure would be logged and produce an empty string.
    #[must_use]
    pub fn status_json(&self) -> String {
        match serde_json::to_string(&self.sim.status()) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("status serialization failed: {err}");
                String::new()
            }
        }
    }
}

impl Universe {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config = SimConfig::from_json(json)?;
        Ok(Self {
            sim: Simulation::new(config)?,
        })
    }

    #[must_use]
    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_tick_render() {
        let mut universe = Universe::new(200, 200);
        universe.on_click_held(100.0, 100.0);
        universe.tick();
        assert_eq!(universe.particle_count(), 4);

        let buf = universe.render_buffer();
        assert_eq!(buf.len(), 4 * RENDER_STRIDE);
        for chunk in buf.chunks(RENDER_STRIDE) {
            assert!((0.0..200.0).contains(&chunk[0]));
            assert!((0.0..200.0).contains(&chunk[1]));
            assert!((0.0..1.0).contains(&chunk[2]));
        }
    }

    #[test]
    fn status_outputs() {
        let mut universe = Universe::new(200, 200);
        universe.on_cursor(5, 6);
        assert_eq!(universe.status_text(), "(5, 6)\nParticles: 0\nState: settled");
        assert_eq!(
            universe.status_json(),
            r#"{"cursor":[5,6],"particle_count":0,"falling":false}"#
        );

        universe.on_click_held(100.0, 100.0);
        universe.tick();
        let status: serde_json::Value = serde_json::from_str(&universe.status_json()).unwrap();
        assert_eq!(status["cursor"], serde_json::json!([5, 6]));
        assert_eq!(status["particle_count"], 4);
        assert_eq!(status["falling"], false);
    }

    #[test]
    fn from_json_applies_config() {
        let universe = Universe::from_json(r#"{"screen_width": 64, "screen_height": 32, "particle_size": 2}"#)
            .unwrap();
        assert_eq!((universe.width(), universe.height()), (64, 32));
        assert_eq!(universe.particle_size(), 2);
        assert_eq!(universe.simulation().grid.width, 32);
        assert_eq!(universe.simulation().grid.height, 16);
    }

    #[test]
    fn from_json_rejects_invalid() {
        assert!(Universe::from_json(r#"{"color_period": 0}"#).is_err());
        assert!(Universe::from_json(r#"{"seed": "x"}"#).is_err());
    }
}

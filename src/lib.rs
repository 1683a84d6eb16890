pub mod camera;
pub mod config;
pub mod data;
pub mod input;
pub mod map;
pub mod nav;
pub mod render;
pub mod scene;

use glam::DVec3;
use serde::{Deserialize, Serialize};

pub use camera::camera::{CameraCommand, CameraState};
pub use config::MapConfig;
pub use input::controller::{InputController, InputEvent, InteractionMode, PointerButton};
pub use map::{StarMap, Viewport};
pub use render::frame::FrameStats;

/// A visited star system as reported by the journal scanner.
///
/// Coordinates are galactic light-years. They are expected to be finite; the
/// renderer does not sanitise NaN or infinite values.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StarSystem {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl StarSystem {
    pub fn new(name: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        StarSystem {
            name: name.into(),
            x,
            y,
            z,
        }
    }

    pub fn position(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Case-insensitive name match, the rule used for current/highlight lookup.
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// Unicode-aware case-insensitive comparison of two system names.
pub fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

use glam::DVec2;
use log::debug;

use crate::camera::camera::CameraState;
use crate::camera::projector::Rotation;
use crate::{names_match, StarSystem};

/// Case-insensitive lookup by system name.
pub fn find_system<'a>(systems: &'a [StarSystem], name: &str) -> Option<&'a StarSystem> {
    let name = name.trim();
    systems.iter().find(|system| system.is_named(name))
}

/// Search-driven navigation: centring the view on a system and keeping the
/// "highlighted" mark, which is independent of the current system.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigator {
    highlighted: Option<String>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    /// Sets or clears the highlight. A blank name clears it. Unknown names
    /// are kept; they simply match nothing when drawn.
    pub fn highlight_system(&mut self, name: Option<&str>) -> bool {
        let next = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        let unchanged = match (&next, &self.highlighted) {
            (Some(next), Some(current)) => names_match(next, current),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return false;
        }
        debug!("highlight {:?} -> {:?}", self.highlighted, next);
        self.highlighted = next;
        true
    }

    /// Pans so the named system's projected position lands on
    /// `viewport_center`, under the camera's current rotation and zoom.
    /// Unknown names leave the camera untouched.
    pub fn center_on_system(
        &self,
        systems: &[StarSystem],
        name: &str,
        camera: &mut CameraState,
        viewport_center: DVec2,
    ) -> bool {
        let Some(system) = find_system(systems, name) else {
            debug!("center: no system named {name:?}");
            return false;
        };
        let rotated = Rotation::from_camera(camera).apply(system.position());
        let pan = viewport_center - rotated.truncate() * camera.zoom();
        debug!("center on {} -> pan {}", system.name, pan);
        camera.set_pan(pan);
        true
    }
}

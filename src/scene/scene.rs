use glam::{DVec2, DVec3};

use crate::camera::camera::CameraState;
use crate::camera::projector::Rotation;
use crate::scene::sort::{depth_sort, Depth};
use crate::scene::starfield::BackgroundStar;
use crate::StarSystem;

/// One system as seen through the camera for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawableSystem<'a> {
    pub system: &'a StarSystem,
    /// Camera-space position; `z` is depth.
    pub rotated: DVec3,
    /// Where the system's drop-line meets the reference plane.
    pub shadow: DVec2,
}

impl DrawableSystem<'_> {
    /// Position in drawing units, before the camera's pan/zoom transform.
    pub fn position(&self) -> DVec2 {
        self.rotated.truncate()
    }
}

impl Depth for DrawableSystem<'_> {
    fn depth(&self) -> f64 {
        self.rotated.z
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawableBackgroundStar<'a> {
    pub star: &'a BackgroundStar,
    pub rotated: DVec3,
}

impl DrawableBackgroundStar<'_> {
    pub fn position(&self) -> DVec2 {
        self.rotated.truncate()
    }
}

impl Depth for DrawableBackgroundStar<'_> {
    fn depth(&self) -> f64 {
        self.rotated.z
    }
}

/// Per-frame drawables. Nothing is culled; every input point is projected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene<'a> {
    pub systems: Vec<DrawableSystem<'a>>,
    pub background: Vec<DrawableBackgroundStar<'a>>,
}

impl<'a> Scene<'a> {
    /// Projects every system and background star. Output order matches the
    /// input slices.
    pub fn build(
        systems: &'a [StarSystem],
        background: &'a [BackgroundStar],
        camera: &CameraState,
    ) -> Self {
        let rotation = Rotation::from_camera(camera);
        let systems = systems
            .iter()
            .map(|system| {
                let position = system.position();
                DrawableSystem {
                    system,
                    rotated: rotation.apply(position),
                    shadow: rotation.shadow(position),
                }
            })
            .collect();
        let background = background
            .iter()
            .map(|star| DrawableBackgroundStar {
                star,
                rotated: rotation.apply(star.position),
            })
            .collect();
        Scene {
            systems,
            background,
        }
    }

    /// Puts both lists into painter's order.
    pub fn sort_by_depth(&mut self) {
        depth_sort(&mut self.systems);
        depth_sort(&mut self.background);
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty() && self.background.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::Color;
    use assert_approx_eq::assert_approx_eq;

    fn camera(yaw: f64, pitch: f64) -> CameraState {
        CameraState::new(yaw, pitch, 1.0, DVec2::ZERO)
    }

    #[test]
    fn build_keeps_source_order() {
        let systems = vec![
            StarSystem::new("Far", 0.0, 0.0, 900.0),
            StarSystem::new("Near", 0.0, 0.0, -900.0),
            StarSystem::new("Mid", 0.0, 0.0, 0.0),
        ];
        let scene = Scene::build(&systems, &[], &camera(0.0, 0.5));
        let names: Vec<&str> = scene.systems.iter().map(|d| d.system.name.as_str()).collect();
        assert_eq!(names, vec!["Far", "Near", "Mid"]);
    }

    #[test]
    fn projects_exact_coordinates() {
        let systems = vec![StarSystem::new("Sol", 100.0, 20.0, 50.0)];
        let scene = Scene::build(&systems, &[], &camera(0.0, 0.5));
        let d = &scene.systems[0];
        let (s, c) = 0.5_f64.sin_cos();
        assert_approx_eq!(d.rotated.x, 100.0);
        assert_approx_eq!(d.rotated.y, 20.0 * c - 50.0 * s);
        assert_approx_eq!(d.rotated.z, 20.0 * s + 50.0 * c);
        assert_approx_eq!(d.shadow.x, 100.0);
        assert_approx_eq!(d.shadow.y, -50.0 * s);
    }

    #[test]
    fn sort_orders_by_depth() {
        let systems = vec![
            StarSystem::new("Far", 0.0, 0.0, 900.0),
            StarSystem::new("Near", 0.0, 0.0, -900.0),
            StarSystem::new("Mid", 0.0, 0.0, 0.0),
        ];
        let stars = vec![
            BackgroundStar {
                position: DVec3::new(0.0, 0.0, 10.0),
                color: Color::rgb(255, 255, 255),
            },
            BackgroundStar {
                position: DVec3::new(0.0, 0.0, -10.0),
                color: Color::rgb(255, 255, 255),
            },
        ];
        let mut scene = Scene::build(&systems, &stars, &camera(0.0, 0.0));
        scene.sort_by_depth();
        let names: Vec<&str> = scene.systems.iter().map(|d| d.system.name.as_str()).collect();
        assert_eq!(names, vec!["Near", "Mid", "Far"]);
        assert!(scene.background[0].rotated.z < scene.background[1].rotated.z);
    }

    #[test]
    fn empty_inputs_build_empty_scene() {
        let scene = Scene::build(&[], &[], &camera(1.0, -0.3));
        assert!(scene.is_empty());
    }
}

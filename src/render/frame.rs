use glam::{DVec2, DVec3};
use log::trace;

use crate::camera::camera::CameraState;
use crate::camera::projector::Rotation;
use crate::config::RenderConfig;
use crate::render::surface::{Color, Surface, Transform};
use crate::scene::scene::{DrawableSystem, Scene};
use crate::StarSystem;

/// Names that receive special styling. Matching is case-insensitive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Marks<'n> {
    pub current: Option<&'n str>,
    pub highlighted: Option<&'n str>,
}

impl Marks<'_> {
    pub fn is_current(&self, system: &StarSystem) -> bool {
        self.current.is_some_and(|name| system.is_named(name))
    }

    pub fn is_highlighted(&self, system: &StarSystem) -> bool {
        self.highlighted.is_some_and(|name| system.is_named(name))
    }
}

/// What a single paint pass drew.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub background_stars: usize,
    pub grid_lines: usize,
    pub systems: usize,
    pub labels: usize,
}

/// Resolved look of one system. Current-system styling takes priority over
/// highlight styling; a highlighted system additionally gets an outer ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SystemStyle {
    pub brush: Color,
    /// Dot radius in screen pixels.
    pub radius: f64,
    pub halo: bool,
    pub highlight_ring: bool,
}

pub struct FrameRenderer<'c> {
    config: &'c RenderConfig,
}

impl<'c> FrameRenderer<'c> {
    pub fn new(config: &'c RenderConfig) -> Self {
        FrameRenderer { config }
    }

    pub fn style_for(&self, system: &StarSystem, marks: &Marks<'_>) -> SystemStyle {
        let config = self.config;
        let current = marks.is_current(system);
        let highlighted = marks.is_highlighted(system);
        let brush = if current {
            config.current
        } else if highlighted {
            config.highlight
        } else if system.y >= 0.0 {
            config.above_plane
        } else {
            config.below_plane
        };
        SystemStyle {
            brush,
            radius: if current {
                config.current_system_radius
            } else {
                config.system_radius
            },
            halo: current,
            highlight_ring: highlighted,
        }
    }

    /// Labels appear once zoomed in past the threshold; the current system is
    /// always labelled.
    pub fn wants_label(&self, zoom: f64, is_current: bool) -> bool {
        is_current || zoom > self.config.label_zoom_threshold
    }

    /// Paints one frame. `scene` must already be in depth order.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        scene: &Scene<'_>,
        camera: &CameraState,
        marks: &Marks<'_>,
    ) -> FrameStats {
        let mut stats = FrameStats::default();

        surface.set_transform(Transform::IDENTITY);
        surface.clear(self.config.background);
        surface.set_transform(Transform {
            translate: camera.pan(),
            scale: camera.zoom(),
        });

        let star_radius = camera.screen_size(self.config.background_star_radius);
        for star in &scene.background {
            surface.fill_circle(star.position(), star_radius, star.star.color);
            stats.background_stars += 1;
        }

        stats.grid_lines = self.draw_grid(surface, camera);

        for drawable in &scene.systems {
            if self.draw_system(surface, drawable, camera, marks) {
                stats.labels += 1;
            }
            stats.systems += 1;
        }

        trace!(
            "frame: {} systems, {} labels, {} background stars, {} grid lines",
            stats.systems,
            stats.labels,
            stats.background_stars,
            stats.grid_lines
        );
        stats
    }

    /// Reference plane at `y = 0`. Each endpoint goes through the rotation on
    /// its own so the grid tilts with the camera.
    fn draw_grid<S: Surface + ?Sized>(&self, surface: &mut S, camera: &CameraState) -> usize {
        let rotation = Rotation::from_camera(camera);
        let lines = self.config.grid_lines;
        if lines < 2 {
            return 0;
        }
        let extent = self.config.grid_half_extent;
        let spacing = 2.0 * extent / (lines - 1) as f64;
        let width = camera.screen_size(self.config.line_width);
        let color = self.config.grid_color;

        let mut drawn = 0;
        for i in 0..lines {
            let t = -extent + i as f64 * spacing;
            let segments = [
                (DVec3::new(t, 0.0, -extent), DVec3::new(t, 0.0, extent)),
                (DVec3::new(-extent, 0.0, t), DVec3::new(extent, 0.0, t)),
            ];
            for (from, to) in segments {
                surface.line(
                    rotation.apply(from).truncate(),
                    rotation.apply(to).truncate(),
                    width,
                    color,
                );
                drawn += 1;
            }
        }
        drawn
    }

    /// Returns true when a label was drawn.
    fn draw_system<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        drawable: &DrawableSystem<'_>,
        camera: &CameraState,
        marks: &Marks<'_>,
    ) -> bool {
        let config = self.config;
        let style = self.style_for(drawable.system, marks);
        let position = drawable.position();
        let line_width = camera.screen_size(config.line_width);

        surface.line(position, drawable.shadow, line_width, config.drop_line);

        let radius = camera.screen_size(style.radius);
        surface.fill_circle(position, radius, style.brush);

        let labelled = self.wants_label(camera.zoom(), style.halo);
        if labelled {
            self.draw_label(surface, &drawable.system.name, position, radius, camera);
        }

        if style.halo {
            surface.stroke_circle(
                position,
                camera.screen_size(config.halo_radius),
                line_width,
                config.halo,
            );
        }
        if style.highlight_ring {
            surface.stroke_circle(
                position,
                camera.screen_size(config.highlight_ring_radius),
                line_width,
                config.highlight,
            );
        }
        labelled
    }

    fn draw_label<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        name: &str,
        anchor: DVec2,
        dot_radius: f64,
        camera: &CameraState,
    ) {
        let config = self.config;
        let font_size = camera.screen_size(config.label_font_size);
        let padding = camera.screen_size(config.label_padding);
        let text_size = surface.measure_text(name, font_size);
        let origin = DVec2::new(
            anchor.x + dot_radius + camera.screen_size(config.label_offset),
            anchor.y - text_size.y / 2.0,
        );

        surface.fill_rect(
            origin - DVec2::splat(padding),
            text_size + DVec2::splat(2.0 * padding),
            config.label_background,
        );
        surface.text(origin, name, font_size, config.label_text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{DrawCommand, RecordingSurface};

    fn config() -> RenderConfig {
        RenderConfig::default()
    }

    #[test]
    fn current_styling_wins_over_highlight() {
        let config = config();
        let renderer = FrameRenderer::new(&config);
        let sol = StarSystem::new("Sol", 0.0, 0.0, 0.0);
        let marks = Marks {
            current: Some("sol"),
            highlighted: Some("SOL"),
        };
        let style = renderer.style_for(&sol, &marks);
        assert_eq!(style.brush, config.current);
        assert_eq!(style.radius, config.current_system_radius);
        assert!(style.halo);
        assert!(style.highlight_ring);
    }

    #[test]
    fn brush_follows_plane_side() {
        let config = config();
        let renderer = FrameRenderer::new(&config);
        let marks = Marks::default();
        let above = StarSystem::new("Up", 0.0, 12.0, 0.0);
        let below = StarSystem::new("Down", 0.0, -12.0, 0.0);
        assert_eq!(renderer.style_for(&above, &marks).brush, config.above_plane);
        assert_eq!(renderer.style_for(&below, &marks).brush, config.below_plane);
        let marks = Marks {
            current: None,
            highlighted: Some("down"),
        };
        let style = renderer.style_for(&below, &marks);
        assert_eq!(style.brush, config.highlight);
        assert_eq!(style.radius, config.system_radius);
        assert!(!style.halo);
    }

    #[test]
    fn screen_sizes_scale_inversely_with_zoom() {
        let config = config();
        let renderer = FrameRenderer::new(&config);
        let systems = vec![StarSystem::new("Sol", 0.0, 0.0, 0.0)];
        let marks = Marks {
            current: Some("Sol"),
            highlighted: None,
        };
        for zoom in [0.1, 1.0, 4.0] {
            let camera = CameraState::new(0.0, 0.0, zoom, DVec2::ZERO);
            let mut scene = Scene::build(&systems, &[], &camera);
            scene.sort_by_depth();
            let mut surface = RecordingSurface::new();
            renderer.render(&mut surface, &scene, &camera, &marks);
            let dot = surface
                .commands()
                .iter()
                .find_map(|c| match c {
                    DrawCommand::FillCircle { radius, color, .. } if *color == config.current => {
                        Some(*radius)
                    }
                    _ => None,
                })
                .expect("current dot");
            assert!((dot - config.current_system_radius).abs() < 1e-9);
        }
    }

    #[test]
    fn grid_draws_both_axes() {
        let config = config();
        let renderer = FrameRenderer::new(&config);
        let camera = CameraState::default();
        let scene = Scene::default();
        let mut surface = RecordingSurface::new();
        let stats = renderer.render(&mut surface, &scene, &camera, &Marks::default());
        assert_eq!(stats.grid_lines, 2 * config.grid_lines);
        assert_eq!(stats.systems, 0);
        assert_eq!(stats.labels, 0);
    }

    #[test]
    fn label_sits_right_of_dot() {
        let config = config();
        let renderer = FrameRenderer::new(&config);
        let systems = vec![StarSystem::new("Achenar", 10.0, 0.0, 0.0)];
        let camera = CameraState::new(0.0, 0.0, 2.0, DVec2::ZERO);
        let scene = Scene::build(&systems, &[], &camera);
        let mut surface = RecordingSurface::new();
        let stats = renderer.render(&mut surface, &scene, &camera, &Marks::default());
        assert_eq!(stats.labels, 1);
        let label = surface.labels().next().expect("label");
        assert_eq!(label.text, "Achenar");
        assert!(label.screen_origin.x > camera.to_screen(DVec2::new(10.0, 0.0)).x);
        assert!(surface
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::FillRect { color, .. } if *color == config.label_background)));
    }
}

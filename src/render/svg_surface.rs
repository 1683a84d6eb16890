//! SVG back end used by the command-line renderer.

use std::path::Path;

use glam::DVec2;
use svg::node::element::{Circle, Group, Line, Rectangle, Text};
use svg::Document;

use crate::render::surface::{Color, Surface, Transform};

/// Collects draw calls into an SVG document. Each transform change opens a
/// new `<g>` carrying that transform.
pub struct SvgSurface {
    width: f64,
    height: f64,
    document: Document,
    group: Group,
    transform: Transform,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        let document = Document::new()
            .set("viewBox", (0.0, 0.0, width, height))
            .set("width", width)
            .set("height", height);
        SvgSurface {
            width,
            height,
            document,
            group: Group::new(),
            transform: Transform::IDENTITY,
        }
    }

    pub fn into_document(mut self) -> Document {
        self.flush_group();
        self.document
    }

    pub fn save<P: AsRef<Path>>(self, path: P) -> std::io::Result<()> {
        svg::save(path, &self.into_document())
    }

    fn flush_group(&mut self) {
        let group = std::mem::replace(&mut self.group, Group::new());
        let t = self.transform;
        let group = group.set(
            "transform",
            format!(
                "translate({} {}) scale({})",
                t.translate.x, t.translate.y, t.scale
            ),
        );
        let document = std::mem::replace(&mut self.document, Document::new());
        self.document = document.add(group);
    }

    fn push<N>(&mut self, node: N)
    where
        N: Into<Box<dyn svg::Node>>,
    {
        let group = std::mem::replace(&mut self.group, Group::new());
        self.group = group.add(node);
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self, color: Color) {
        let background = Rectangle::new()
            .set("x", 0.0)
            .set("y", 0.0)
            .set("width", self.width)
            .set("height", self.height)
            .set("fill", color.to_css());
        self.push(background);
    }

    fn set_transform(&mut self, transform: Transform) {
        self.flush_group();
        self.transform = transform;
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
        let circle = Circle::new()
            .set("cx", center.x)
            .set("cy", center.y)
            .set("r", radius)
            .set("fill", color.to_css());
        self.push(circle);
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: Color) {
        let circle = Circle::new()
            .set("cx", center.x)
            .set("cy", center.y)
            .set("r", radius)
            .set("fill", "none")
            .set("stroke", color.to_css())
            .set("stroke-width", width);
        self.push(circle);
    }

    fn line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color) {
        let line = Line::new()
            .set("x1", from.x)
            .set("y1", from.y)
            .set("x2", to.x)
            .set("y2", to.y)
            .set("stroke", color.to_css())
            .set("stroke-width", width);
        self.push(line);
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Color) {
        let rect = Rectangle::new()
            .set("x", origin.x)
            .set("y", origin.y)
            .set("width", size.x)
            .set("height", size.y)
            .set("fill", color.to_css());
        self.push(rect);
    }

    fn text(&mut self, origin: DVec2, text: &str, font_size: f64, color: Color) {
        let label = Text::new(text)
            .set("x", origin.x)
            .set("y", origin.y)
            .set("font-size", font_size)
            .set("font-family", "monospace")
            .set("dominant-baseline", "hanging")
            .set("fill", color.to_css());
        self.push(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_transformed_groups() {
        let mut surface = SvgSurface::new(200.0, 100.0);
        surface.clear(Color::rgb(0, 0, 0));
        surface.set_transform(Transform {
            translate: DVec2::new(100.0, 50.0),
            scale: 0.5,
        });
        surface.fill_circle(DVec2::ZERO, 4.0, Color::rgb(255, 0, 0));
        surface.text(DVec2::new(8.0, 0.0), "Sol", 22.0, Color::rgb(255, 255, 255));
        let rendered = surface.into_document().to_string();
        assert!(rendered.contains("translate(100 50) scale(0.5)"));
        assert!(rendered.contains("<circle"));
        assert!(rendered.contains("Sol"));
    }
}

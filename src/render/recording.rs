//! Headless surface that records draw calls in screen space.

use glam::DVec2;

use crate::render::surface::{Color, Surface, Transform};

/// A draw call after the active transform was applied. Positions and sizes
/// are in screen pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillCircle {
        center: DVec2,
        radius: f64,
        color: Color,
    },
    StrokeCircle {
        center: DVec2,
        radius: f64,
        width: f64,
        color: Color,
    },
    Line {
        from: DVec2,
        to: DVec2,
        width: f64,
        color: Color,
    },
    FillRect {
        origin: DVec2,
        size: DVec2,
        color: Color,
    },
    Text {
        origin: DVec2,
        text: String,
        font_size: f64,
        color: Color,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelRef<'a> {
    pub text: &'a str,
    pub screen_origin: DVec2,
}

#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    transform: Transform,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn labels(&self) -> impl Iterator<Item = LabelRef<'_>> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { origin, text, .. } => Some(LabelRef {
                text: text.as_str(),
                screen_origin: *origin,
            }),
            _ => None,
        })
    }

    /// Centres of filled circles painted with `color`, in paint order.
    pub fn dots_with(&self, color: Color) -> Vec<DVec2> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillCircle {
                    center, color: c, ..
                } if *c == color => Some(*center),
                _ => None,
            })
            .collect()
    }

    /// Stroked circles painted with `color` as `(centre, radius)`.
    pub fn rings_with(&self, color: Color) -> Vec<(DVec2, f64)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    color: c,
                    ..
                } if *c == color => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    fn map(&self, point: DVec2) -> DVec2 {
        self.transform.apply(point)
    }

    fn scale(&self, size: f64) -> f64 {
        size * self.transform.scale
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center: self.map(center),
            radius: self.scale(radius),
            color,
        });
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center: self.map(center),
            radius: self.scale(radius),
            width: self.scale(width),
            color,
        });
    }

    fn line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color) {
        self.commands.push(DrawCommand::Line {
            from: self.map(from),
            to: self.map(to),
            width: self.scale(width),
            color,
        });
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            origin: self.map(origin),
            size: size * self.transform.scale,
            color,
        });
    }

    fn text(&mut self, origin: DVec2, text: &str, font_size: f64, color: Color) {
        self.commands.push(DrawCommand::Text {
            origin: self.map(origin),
            text: text.to_string(),
            font_size: self.scale(font_size),
            color,
        });
    }
}

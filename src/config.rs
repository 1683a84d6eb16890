//! Tunables for the camera, the painter and the decorative starfield.
//!
//! Every field has a default, so a config file only needs to name what it
//! overrides.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::surface::Color;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    pub camera: CameraConfig,
    pub render: RenderConfig,
    pub starfield: StarfieldConfig,
}

impl MapConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("loading map config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        finite("camera.initial_yaw", camera.initial_yaw)?;
        finite("camera.initial_pitch", camera.initial_pitch)?;
        positive("camera.initial_zoom", camera.initial_zoom)?;
        positive("camera.orbit_sensitivity", camera.orbit_sensitivity)?;
        if !(camera.wheel_zoom_step.is_finite() && camera.wheel_zoom_step > 1.0) {
            return Err(invalid("camera.wheel_zoom_step", "must be greater than 1"));
        }

        let render = &self.render;
        if render.grid_lines < 2 {
            return Err(invalid("render.grid_lines", "need at least two lines per axis"));
        }
        positive("render.grid_half_extent", render.grid_half_extent)?;
        positive("render.system_radius", render.system_radius)?;
        positive("render.current_system_radius", render.current_system_radius)?;
        positive("render.halo_radius", render.halo_radius)?;
        positive("render.highlight_ring_radius", render.highlight_ring_radius)?;
        positive("render.background_star_radius", render.background_star_radius)?;
        positive("render.line_width", render.line_width)?;
        positive("render.label_zoom_threshold", render.label_zoom_threshold)?;
        positive("render.label_font_size", render.label_font_size)?;
        finite("render.label_padding", render.label_padding)?;
        finite("render.label_offset", render.label_offset)?;

        positive("starfield.extent", self.starfield.extent)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be finite"))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive finite number"))
    }
}

/// Initial view and input sensitivities.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub initial_yaw: f64,
    pub initial_pitch: f64,
    pub initial_zoom: f64,
    /// Radians of yaw/pitch per pixel of orbit drag.
    pub orbit_sensitivity: f64,
    /// Multiplicative zoom per wheel notch.
    pub wheel_zoom_step: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            initial_yaw: 0.0,
            initial_pitch: 0.5,
            initial_zoom: 0.1,
            orbit_sensitivity: 0.01,
            wheel_zoom_step: 1.25,
        }
    }
}

/// Sizes are in screen pixels unless noted; the painter divides them by zoom.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub background: Color,
    /// Lines per axis on the reference plane.
    pub grid_lines: usize,
    /// Half-width of the reference grid, in world units.
    pub grid_half_extent: f64,
    pub grid_color: Color,
    pub system_radius: f64,
    pub current_system_radius: f64,
    pub halo_radius: f64,
    pub highlight_ring_radius: f64,
    pub background_star_radius: f64,
    pub line_width: f64,
    pub label_zoom_threshold: f64,
    pub label_font_size: f64,
    pub label_padding: f64,
    pub label_offset: f64,
    pub above_plane: Color,
    pub below_plane: Color,
    pub current: Color,
    pub highlight: Color,
    pub halo: Color,
    pub drop_line: Color,
    pub label_text: Color,
    pub label_background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            background: Color::rgb(5, 6, 16),
            grid_lines: 21,
            grid_half_extent: 1000.0,
            grid_color: Color::rgba(70, 90, 140, 90),
            system_radius: 3.0,
            current_system_radius: 6.0,
            halo_radius: 11.0,
            highlight_ring_radius: 15.0,
            background_star_radius: 1.0,
            line_width: 1.0,
            label_zoom_threshold: 1.0,
            label_font_size: 11.0,
            label_padding: 2.0,
            label_offset: 8.0,
            above_plane: Color::rgb(120, 190, 255),
            below_plane: Color::rgb(255, 170, 90),
            current: Color::rgb(255, 240, 80),
            highlight: Color::rgb(80, 255, 140),
            halo: Color::rgba(255, 240, 80, 170),
            drop_line: Color::rgba(150, 150, 170, 110),
            label_text: Color::rgb(235, 235, 245),
            label_background: Color::rgba(20, 24, 40, 200),
        }
    }
}

/// The decorative background field. A fixed seed keeps it identical between
/// runs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    pub seed: u64,
    /// Half-size of the cube the stars are scattered in, in world units.
    pub extent: f64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        StarfieldConfig {
            count: 400,
            seed: 0x5EED_57A2,
            extent: 5000.0,
        }
    }
}

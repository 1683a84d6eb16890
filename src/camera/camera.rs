use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec2;
use log::warn;

use crate::config::CameraConfig;

pub const MIN_ZOOM: f64 = 0.005;
pub const MAX_ZOOM: f64 = 50.0;
/// Pitch is held inside ±90° so the view never flips over the pole.
pub const MAX_PITCH: f64 = FRAC_PI_2;

/// A single mutation of the camera. Input handlers and navigation produce
/// these instead of writing camera fields directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraCommand {
    /// Screen-space drag, in pixels.
    Pan(DVec2),
    /// Yaw and pitch deltas, in radians.
    Orbit { d_yaw: f64, d_pitch: f64 },
    /// Multiplicative zoom keeping the world point under `at` fixed.
    Zoom { at: DVec2, factor: f64 },
}

/// Orthographic orbit camera: yaw/pitch rotation followed by a screen-space
/// translate and uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pitch: f64,
    yaw: f64,
    zoom: f64,
    pan: DVec2,
}

impl CameraState {
    pub fn new(yaw: f64, pitch: f64, zoom: f64, pan: DVec2) -> Self {
        CameraState {
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
            yaw: wrap_angle(yaw),
            zoom: clamp_zoom(zoom),
            pan,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(
            config.initial_yaw,
            config.initial_pitch,
            config.initial_zoom,
            DVec2::ZERO,
        )
    }

    /// Rotation about the horizontal axis (`rotationX`).
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Rotation about the vertical axis (`rotationY`).
    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> DVec2 {
        self.pan
    }

    pub fn set_pan(&mut self, pan: DVec2) {
        self.pan = pan;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
    }

    /// Applies yaw/pitch deltas. Pitch is clamped afterwards and yaw is wrapped
    /// into `[-π, π]` so long sessions do not accumulate large angles.
    pub fn rotate(&mut self, d_yaw: f64, d_pitch: f64) -> bool {
        if !d_yaw.is_finite() || !d_pitch.is_finite() {
            warn!("ignoring non-finite rotation ({d_yaw}, {d_pitch})");
            return false;
        }
        let before = (self.yaw, self.pitch);
        self.yaw = wrap_angle(self.yaw + d_yaw);
        self.pitch = (self.pitch + d_pitch).clamp(-MAX_PITCH, MAX_PITCH);
        before != (self.yaw, self.pitch)
    }

    pub fn pan_by(&mut self, delta: DVec2) -> bool {
        if !delta.is_finite() || delta == DVec2::ZERO {
            return false;
        }
        self.pan += delta;
        true
    }

    /// Multiplies zoom by `factor` (clamped) and shifts the pan so the world
    /// point under `screen_point` stays under it:
    /// `pan' = p - (p - pan) * (new / old)`.
    pub fn zoom_at(&mut self, screen_point: DVec2, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 || !screen_point.is_finite() {
            warn!("ignoring zoom factor {factor} at {screen_point}");
            return false;
        }
        let old_zoom = self.zoom;
        let new_zoom = clamp_zoom(old_zoom * factor);
        if new_zoom == old_zoom {
            return false;
        }
        let ratio = new_zoom / old_zoom;
        self.pan = screen_point - (screen_point - self.pan) * ratio;
        self.zoom = new_zoom;
        true
    }

    /// Returns true when the camera changed.
    pub fn apply(&mut self, command: CameraCommand) -> bool {
        match command {
            CameraCommand::Pan(delta) => self.pan_by(delta),
            CameraCommand::Orbit { d_yaw, d_pitch } => self.rotate(d_yaw, d_pitch),
            CameraCommand::Zoom { at, factor } => self.zoom_at(at, factor),
        }
    }

    /// Maps a rotated (camera-space) point onto the screen.
    pub fn to_screen(&self, rotated: DVec2) -> DVec2 {
        self.pan + rotated * self.zoom
    }

    /// Inverse of [`CameraState::to_screen`].
    pub fn from_screen(&self, screen: DVec2) -> DVec2 {
        (screen - self.pan) / self.zoom
    }

    /// Converts a constant on-screen size into drawing units under the
    /// current zoom.
    pub fn screen_size(&self, pixels: f64) -> f64 {
        pixels / self.zoom
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return MIN_ZOOM;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    (angle + PI).rem_euclid(TAU) - PI
}

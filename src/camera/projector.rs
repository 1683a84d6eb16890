use glam::{DVec2, DVec3};

use crate::camera::camera::CameraState;

/// Yaw/pitch sines and cosines, computed once per frame and reused for every
/// projected point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    sin_yaw: f64,
    cos_yaw: f64,
    sin_pitch: f64,
    cos_pitch: f64,
}

impl Rotation {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        let (sin_pitch, cos_pitch) = pitch.sin_cos();
        Rotation {
            sin_yaw,
            cos_yaw,
            sin_pitch,
            cos_pitch,
        }
    }

    pub fn from_camera(camera: &CameraState) -> Self {
        Self::new(camera.yaw(), camera.pitch())
    }

    /// Yaw about the vertical axis, then pitch about the horizontal axis.
    /// The result's `z` is camera-space depth.
    pub fn apply(&self, point: DVec3) -> DVec3 {
        let temp_x = point.x * self.cos_yaw + point.z * self.sin_yaw;
        let temp_z = -point.x * self.sin_yaw + point.z * self.cos_yaw;
        DVec3::new(
            temp_x,
            point.y * self.cos_pitch - temp_z * self.sin_pitch,
            point.y * self.sin_pitch + temp_z * self.cos_pitch,
        )
    }

    /// Projection of the point dropped onto the reference plane (`y = 0`).
    pub fn shadow(&self, point: DVec3) -> DVec2 {
        self.apply(DVec3::new(point.x, 0.0, point.z)).truncate()
    }
}

/// Rotates a world point by the camera's yaw and pitch.
pub fn project(point: DVec3, camera: &CameraState) -> DVec3 {
    Rotation::from_camera(camera).apply(point)
}

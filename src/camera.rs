use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Perspective camera on the +Z axis looking at the origin.
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,
    aspect: f32,
}

impl Camera {
    pub fn new(config: CameraConfig, width: f64, height: f64) -> Self {
        let mut camera = Self {
            config,
            aspect: 1.0,
        };
        camera.set_viewport(width, height);
        camera
    }

    /// Recomputes the aspect ratio. A zero-height viewport keeps the old one.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = (width / height) as f32;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.config.fov_degrees.to_radians(),
            self.aspect,
            self.config.near,
            self.config.far,
        )
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.config.eye_depth))
    }
}

//! Host-side state of the particle background: the generated cloud, the
//! animation clock and the rotation of the whole system.
//!
//! The renderer reads this once per frame to fill its uniforms. Keeping it
//! free of any GL handle lets tests step a frame without a browser.

use glam::Mat4;
use rand::Rng;

use crate::config::FieldConfig;
use crate::particles::{self, Particle};

#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    time: f32,
    /// Euler angles about X and Y, applied in XYZ order.
    rotation: [f32; 2],
    frames: u64,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(config: FieldConfig, rng: &mut R) -> Self {
        let particles = particles::generate(rng, &config);
        Self::from_particles(config, particles)
    }

    pub fn from_particles(config: FieldConfig, particles: Vec<Particle>) -> Self {
        Self {
            config,
            particles,
            time: 0.0,
            rotation: [0.0, 0.0],
            frames: 0,
        }
    }

    /// One frame: advance the clock by the fixed step and rotate the cloud.
    ///
    /// The step is per frame, not per second, so perceived speed follows the
    /// display refresh rate.
    pub fn advance(&mut self) {
        self.time += self.config.time_step;
        self.rotation[0] += self.config.rotation_step[0];
        self.rotation[1] += self.config.rotation_step[1];
        self.frames += 1;
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation[0]) * Mat4::from_rotation_y(self.rotation[1])
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn rotation(&self) -> [f32; 2] {
        self.rotation
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

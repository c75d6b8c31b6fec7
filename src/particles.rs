//! Point-cloud generation and the wrap rule shared with the vertex shader.

use glam::Vec3;
use rand::Rng;

use crate::config::FieldConfig;

const FLOAT_BYTES: usize = std::mem::size_of::<f32>();

/// Floats per particle in the interleaved vertex buffer.
pub const FLOATS_PER_PARTICLE: usize = 7;
/// Byte stride of one particle in the vertex buffer.
pub const STRIDE_BYTES: i32 = (FLOATS_PER_PARTICLE * FLOAT_BYTES) as i32;
/// Byte offsets of the position, velocity and size attributes.
pub const POSITION_OFFSET: i32 = 0;
pub const VELOCITY_OFFSET: i32 = (3 * FLOAT_BYTES) as i32;
pub const SIZE_OFFSET: i32 = (6 * FLOAT_BYTES) as i32;

/// One point sprite. Never mutated after generation; motion happens on the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub size: f32,
}

impl Particle {
    /// Draws one particle uniformly from the cube, velocity box and size range.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, config: &FieldConfig) -> Self {
        let mut centered = |half: f32| (rng.gen::<f32>() - 0.5) * 2.0 * half;
        let position = [
            centered(config.extent),
            centered(config.extent),
            centered(config.extent),
        ];
        let velocity = [
            centered(config.max_speed),
            centered(config.max_speed),
            centered(config.max_speed),
        ];
        let size = rng.gen::<f32>() * config.max_size;
        Self {
            position,
            velocity,
            size,
        }
    }
}

/// Generates `config.particle_count` particles.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, config: &FieldConfig) -> Vec<Particle> {
    (0..config.particle_count)
        .map(|_| Particle::random(rng, config))
        .collect()
}

/// Flattens particles into the `[px py pz vx vy vz size]*` layout the GPU reads.
pub fn interleave(particles: &[Particle]) -> Vec<f32> {
    let mut out = Vec::with_capacity(particles.len() * FLOATS_PER_PARTICLE);
    for p in particles {
        out.extend_from_slice(&p.position);
        out.extend_from_slice(&p.velocity);
        out.push(p.size);
    }
    out
}

/// Hard reset at the boundary: past `+extent` jumps to `-extent` and vice versa.
///
/// This is not a modulo wrap. A coordinate that drifts past the edge lands
/// exactly on the opposite edge no matter how far it overshot.
pub fn wrap_axis(v: f32, extent: f32) -> f32 {
    if v > extent {
        -extent
    } else if v < -extent {
        extent
    } else {
        v
    }
}

/// CPU mirror of the vertex shader's position update at `time`.
pub fn wrapped_position(particle: &Particle, time: f32, extent: f32) -> Vec3 {
    let pos = Vec3::from(particle.position) + Vec3::from(particle.velocity) * time;
    Vec3::new(
        wrap_axis(pos.x, extent),
        wrap_axis(pos.y, extent),
        wrap_axis(pos.z, extent),
    )
}

use deck_wasm::config::{rgb_from_hex, FieldConfig, ACCENT_RGB};
use deck_wasm::particles::{
    generate, interleave, wrap_axis, wrapped_position, Particle, FLOATS_PER_PARTICLE,
    POSITION_OFFSET, SIZE_OFFSET, STRIDE_BYTES, VELOCITY_OFFSET,
};
use std::mem::offset_of;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() < eps
}

#[test]
fn generated_particles_stay_in_range() {
    let config = FieldConfig::default();
    for seed in [1, 7, 42, 1234] {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = generate(&mut rng, &config);
        assert_eq!(particles.len(), 200);

        for p in &particles {
            for c in p.position {
                assert!((-50.0..=50.0).contains(&c), "position {:?}", p.position);
            }
            for c in p.velocity {
                assert!((-0.1..=0.1).contains(&c), "velocity {:?}", p.velocity);
            }
            assert!((0.0..=2.0).contains(&p.size), "size {}", p.size);
        }
    }
}

#[test]
fn generation_fills_the_whole_cube() {
    let mut rng = StdRng::seed_from_u64(3);
    let particles = generate(&mut rng, &FieldConfig::default());
    let negative = particles.iter().filter(|p| p.position[0] < 0.0).count();
    let positive = particles.len() - negative;
    assert!(negative > 50 && positive > 50, "neg={} pos={}", negative, positive);
}

#[test]
fn particle_count_follows_config() {
    let config = FieldConfig {
        particle_count: 17,
        ..FieldConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(generate(&mut rng, &config).len(), 17);
}

#[test]
fn interleaved_layout_matches_stride() {
    let particles = [
        Particle {
            position: [1.0, 2.0, 3.0],
            velocity: [0.01, 0.02, 0.03],
            size: 1.5,
        },
        Particle {
            position: [-4.0, -5.0, -6.0],
            velocity: [-0.04, -0.05, -0.06],
            size: 0.5,
        },
    ];
    let data = interleave(&particles);
    assert_eq!(data.len(), 2 * FLOATS_PER_PARTICLE);
    assert_eq!(STRIDE_BYTES as usize, std::mem::size_of::<Particle>());
    assert_eq!(&data[..7], &[1.0, 2.0, 3.0, 0.01, 0.02, 0.03, 1.5]);
    assert_eq!(data[7], -4.0);
    assert_eq!(data[13], 0.5);
}

#[test]
fn attribute_offsets_match_particle_layout() {
    assert_eq!(POSITION_OFFSET as usize, offset_of!(Particle, position));
    assert_eq!(VELOCITY_OFFSET as usize, offset_of!(Particle, velocity));
    assert_eq!(SIZE_OFFSET as usize, offset_of!(Particle, size));
    assert_eq!(VELOCITY_OFFSET, 12);
    assert_eq!(SIZE_OFFSET, 24);
}

#[test]
fn wrap_is_a_hard_reset_not_modulo() {
    assert_eq!(wrap_axis(10.0, 50.0), 10.0);
    assert_eq!(wrap_axis(50.0, 50.0), 50.0);
    assert_eq!(wrap_axis(-50.0, 50.0), -50.0);
    assert_eq!(wrap_axis(50.5, 50.0), -50.0);
    assert_eq!(wrap_axis(-50.5, 50.0), 50.0);
    // Modulo would land at -45 here.
    assert_eq!(wrap_axis(55.0, 50.0), -50.0);
    assert_eq!(wrap_axis(-170.0, 50.0), 50.0);
}

#[test]
fn wrapped_position_is_deterministic() {
    let particle = Particle {
        position: [49.0, 0.0, -49.0],
        velocity: [0.1, 0.05, -0.1],
        size: 1.0,
    };

    let early = wrapped_position(&particle, 5.0, 50.0);
    assert!(approx_eq(early.x, 49.5, 1e-4));
    assert!(approx_eq(early.y, 0.25, 1e-4));
    assert!(approx_eq(early.z, -49.5, 1e-4));

    let late = wrapped_position(&particle, 20.0, 50.0);
    assert_eq!(late.x, -50.0);
    assert!(approx_eq(late.y, 1.0, 1e-4));
    assert_eq!(late.z, 50.0);

    assert_eq!(late, wrapped_position(&particle, 20.0, 50.0));
}

#[test]
fn accent_color_channels() {
    let [r, g, b] = rgb_from_hex(ACCENT_RGB);
    assert!(approx_eq(r, 118.0 / 255.0, 1e-6));
    assert!(approx_eq(g, 185.0 / 255.0, 1e-6));
    assert_eq!(b, 0.0);
    assert_eq!(FieldConfig::default().color, [r, g, b]);
}

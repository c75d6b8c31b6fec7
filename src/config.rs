//! Compile-time configuration for the particle field and the slide deck.
//!
//! Nothing here is read from the environment; the page entry point uses the
//! `Default` values and tests build their own.

/// Accent color of the particles (0x76B900).
pub const ACCENT_RGB: u32 = 0x76B900;

/// Parameters of the generated point cloud and its per-frame motion.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Id of the canvas the field is drawn into.
    pub canvas_id: &'static str,
    pub particle_count: usize,
    /// Half-width of the cube particles spawn in and wrap around.
    pub extent: f32,
    /// Largest absolute velocity component.
    pub max_speed: f32,
    pub max_size: f32,
    /// Added to the time uniform once per frame.
    pub time_step: f32,
    /// Per-frame rotation about X and Y, in radians.
    pub rotation_step: [f32; 2],
    pub color: [f32; 3],
    /// Numerator of the point-size attenuation `size * k / -z`.
    pub size_attenuation: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            canvas_id: "bg-canvas",
            particle_count: 200,
            extent: 50.0,
            max_speed: 0.1,
            max_size: 2.0,
            time_step: 0.1,
            rotation_step: [0.0005, 0.001],
            color: rgb_from_hex(ACCENT_RGB),
            size_attenuation: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Distance of the eye from the origin along +Z.
    pub eye_depth: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            eye_depth: 50.0,
        }
    }
}

/// Element ids, selectors and CSS values the navigator touches.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckConfig {
    pub slide_selector: &'static str,
    pub prev_id: &'static str,
    pub next_id: &'static str,
    pub progress_id: &'static str,
    pub active_class: &'static str,
    /// `display` value for a visible navigation control.
    pub shown_display: &'static str,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            slide_selector: ".slide",
            prev_id: "prev-btn",
            next_id: "next-btn",
            progress_id: "progress-bar",
            active_class: "active",
            shown_display: "flex",
        }
    }
}

/// Splits `0xRRGGBB` into linear 0..1 channels.
pub fn rgb_from_hex(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}

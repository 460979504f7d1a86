//! Time-driven color intensity.

use learngl_engine::paint::Color;

/// Intensity in `[0, 1]`: `sin(t) / 2 + 0.5`.
///
/// Computed once per frame and shared by every draw, so all triangles pulse in phase.
pub fn oscillate(t: f64) -> f32 {
    (t.sin() / 2.0 + 0.5) as f32
}

pub fn orange(c: f32) -> Color {
    Color::new(c, c / 2.0, c / 3.0, 1.0)
}

pub fn yellow(c: f32) -> Color {
    Color::new(c, c, 0.0, 1.0)
}

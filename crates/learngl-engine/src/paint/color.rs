use bytemuck::{Pod, Zeroable};

/// Straight-alpha RGBA color, laid out as a WGSL `vec4<f32>`.
///
/// Values are written to uniform buffers as-is; no sRGB conversion happens on the
/// CPU side.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Clear color for a render pass load op.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_bytes_are_rgba_f32() {
        let c = Color::new(0.1, 0.2, 0.3, 0.4);
        let bytes = bytemuck::bytes_of(&c);
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytemuck::cast_slice::<u8, f32>(bytes), &[0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn opaque_sets_alpha_to_one() {
        assert_eq!(Color::opaque(0.9, 0.3, 0.3).a, 1.0);
    }

    #[test]
    fn to_wgpu_widens_channels() {
        let w = Color::opaque(0.5, 0.25, 0.0).to_wgpu();
        assert_eq!((w.r, w.g, w.b, w.a), (0.5, 0.25, 0.0, 1.0));
    }
}

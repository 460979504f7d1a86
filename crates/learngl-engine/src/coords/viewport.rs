/// Rendering viewport in physical pixels.
///
/// The runtime replaces it on every resize with the full framebuffer rect. There is
/// no aspect-ratio correction: content stretches with the window.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering a whole framebuffer of the given size.
    #[inline]
    pub const fn from_framebuffer_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// A zero-area viewport cannot be rendered to (e.g. minimized window).
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Arguments for `wgpu::RenderPass::set_viewport` (x, y, w, h).
    #[inline]
    pub fn as_f32(self) -> (f32, f32, f32, f32) {
        (self.x as f32, self.y as f32, self.width as f32, self.height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_maps_to_full_framebuffer() {
        assert_eq!(Viewport::from_framebuffer_size(400, 300), Viewport::new(0, 0, 400, 300));
    }

    #[test]
    fn zero_dimension_is_empty() {
        assert!(Viewport::from_framebuffer_size(0, 300).is_empty());
        assert!(Viewport::from_framebuffer_size(400, 0).is_empty());
        assert!(!Viewport::from_framebuffer_size(1, 1).is_empty());
    }

    #[test]
    fn as_f32_keeps_origin() {
        assert_eq!(Viewport::new(0, 0, 800, 600).as_f32(), (0.0, 0.0, 800.0, 600.0));
    }
}

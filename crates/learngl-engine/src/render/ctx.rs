use crate::coords::Viewport;

/// Renderer-facing context (device/queue + surface format + viewport).
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub viewport: Viewport,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            viewport,
        }
    }
}

/// Target for drawing: an open render pass that already cleared the frame and set
/// the viewport.
pub struct RenderTarget<'a, 'p> {
    pub pass: &'a mut wgpu::RenderPass<'p>,
}

impl<'a, 'p> RenderTarget<'a, 'p> {
    #[inline]
    pub fn new(pass: &'a mut wgpu::RenderPass<'p>) -> Self {
        Self { pass }
    }
}

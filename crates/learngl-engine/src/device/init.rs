/// Initialization parameters for the GPU layer.
///
/// This is the "context request": which graphics APIs to try, in order, and the
/// capability class the demo needs.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends to try, in preference order.
    ///
    /// Each entry gets its own instance and surface; the first one that yields an
    /// adapter able to present to the window and a device wins.
    pub backends: Vec<wgpu::Backends>,

    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO is vsync and universally supported.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    ///
    /// Defaults to the WebGL2 class, which any GL 3.3 core context satisfies.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: vec![wgpu::Backends::GL, wgpu::Backends::PRIMARY],
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}

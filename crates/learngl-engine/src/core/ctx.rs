use winit::window::Window;

use crate::coords::Viewport;
use crate::device::Gpu;
use crate::input::InputState;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;

use super::app::AppControl;

/// Context passed to `core::App::on_start`.
pub struct StartCtx<'a, 'w> {
    pub gpu: &'a Gpu<'w>,
    pub viewport: Viewport,
}

impl<'a, 'w> StartCtx<'a, 'w> {
    pub fn render_ctx(&self) -> RenderCtx<'_> {
        RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
            self.viewport,
        )
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub time: FrameTime,
    pub viewport: Viewport,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Clears the frame to `clear`, sets the viewport, calls `draw` with the open
    /// pass, then presents.
    ///
    /// Frames are skipped while the viewport is empty or the surface cannot be
    /// acquired; `AppControl::Exit` is returned only for fatal surface errors.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_, '_>),
    {
        if self.viewport.is_empty() {
            return AppControl::Continue;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                if self.gpu.handle_surface_error(err).closes_loop() {
                    log::error!("surface lost beyond recovery; closing");
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        {
            let rctx = RenderCtx::new(
                self.gpu.device(),
                self.gpu.queue(),
                self.gpu.surface_format(),
                self.viewport,
            );

            // Color only: depth/stencil are never attached.
            let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("learngl frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let (x, y, w, h) = self.viewport.as_f32();
            pass.set_viewport(x, y, w, h, 0.0, 1.0);

            let mut target = RenderTarget::new(&mut pass);
            draw(&rctx, &mut target);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}

use anyhow::Result;

use super::ctx::{FrameCtx, StartCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the binary.
///
/// Call order: `on_start` once after the GPU context exists, `on_frame` once per
/// redraw while the loop is running, `on_exit` once before the context is dropped.
pub trait App {
    /// Creates GPU resources. An error here is fatal.
    fn on_start(&mut self, ctx: &StartCtx<'_, '_>) -> Result<()>;

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Releases GPU resources. The context is still alive during this call.
    fn on_exit(&mut self) {}
}

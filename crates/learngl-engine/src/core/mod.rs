//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the application:
//! the `App` callbacks, the per-frame context and the loop state machine.

mod app;
mod ctx;
mod state;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, StartCtx};
pub use state::LoopState;

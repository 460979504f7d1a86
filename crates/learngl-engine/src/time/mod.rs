//! Time subsystem.
//!
//! One `ContextClock` per GPU context. It is started when the context is created
//! and sampled once per rendered frame.

mod context_clock;

pub use context_clock::{ContextClock, FrameTime};

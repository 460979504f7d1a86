//! learngl engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the demo binary: window and
//! event loop, device/surface, input, timing, shader builds and mesh upload.

pub mod core;
pub mod device;
pub mod error;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;

//! Framebuffer coordinate types.
//!
//! All values are physical pixels with the origin at the top-left of the surface.

mod viewport;

pub use viewport::Viewport;

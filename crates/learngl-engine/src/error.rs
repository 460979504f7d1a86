use std::fmt;

/// Fatal startup failures.
///
/// Any of these ends the process before the first frame is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    /// The platform event loop could not be created.
    EventLoop(String),
    /// The native window could not be created.
    WindowCreation(String),
    /// No backend produced a usable surface, adapter and device.
    GraphicsLoader(String),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::EventLoop(msg) => write!(f, "failed to create event loop: {msg}"),
            StartupError::WindowCreation(msg) => write!(f, "failed to create window: {msg}"),
            StartupError::GraphicsLoader(msg) => {
                write!(f, "failed to initialize graphics context: {msg}")
            }
        }
    }
}

impl std::error::Error for StartupError {}

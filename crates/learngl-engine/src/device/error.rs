/// What the render loop does after the surface texture could not be acquired.
///
/// Every variant except `Fatal` skips the current frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// `Lost`/`Outdated`: surface reconfigured at the current size.
    Reconfigured,
    /// `Timeout`/`Other`: nothing to fix, try again next frame.
    SkipFrame,
    /// Out of memory: the loop closes.
    Fatal,
}

impl SurfaceErrorAction {
    pub fn closes_loop(self) -> bool {
        self == SurfaceErrorAction::Fatal
    }
}

use crate::input::{InputState, Key};

/// Render loop state.
///
/// `Running` until the close flag is raised, then `Closing` for good.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LoopState {
    #[default]
    Running,
    Closing,
}

impl LoopState {
    /// Raises the close flag. Idempotent.
    pub fn request_close(&mut self) {
        *self = LoopState::Closing;
    }

    /// Per-frame input poll: Escape held means close.
    pub fn poll_input(&mut self, input: &InputState) {
        if input.key_down(Key::Escape) {
            self.request_close();
        }
    }

    pub fn is_running(self) -> bool {
        self == LoopState::Running
    }
}

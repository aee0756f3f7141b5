//! Application state definitions

use super::{PassForm, ResponseState};
use std::collections::VecDeque;

/// Everything the renderer reads
#[derive(Debug, Default)]
pub struct AppState {
    /// Values typed into the form
    pub form: PassForm,
    /// Latest submission result
    pub response: ResponseState,
    /// Transient status bar message
    pub status_message: Option<String>,
    /// Errors waiting to be shown in the error dialog, oldest first
    pub error_queue: VecDeque<String>,
}

impl AppState {
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    pub fn has_error(&self) -> bool {
        !self.error_queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(state.form, PassForm::new());
        assert_eq!(state.response, ResponseState::Idle);
        assert!(!state.has_error());
    }

    #[test]
    fn test_error_queue_order() {
        let mut state = AppState::default();
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(state.current_error().is_none());
        state.dismiss_error();
        assert!(!state.has_error());
    }
}

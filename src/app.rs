//! Application state and core logic

use crate::api::PassApi;
use crate::platform::COPY_MODIFIER;
use crate::state::{
    AppState, Form, FormButton, ResponseState, SubmissionCompleted, SubmissionTracker,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Pass service client
    api: Arc<dyn PassApi>,
    /// Sequencing of in-flight submissions
    tracker: SubmissionTracker,
    completions_tx: UnboundedSender<SubmissionCompleted>,
    completions_rx: UnboundedReceiver<SubmissionCompleted>,
    /// Endpoint shown in the status bar
    pub endpoint: String,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(api: Arc<dyn PassApi>, endpoint: impl Into<String>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            api,
            tracker: SubmissionTracker::new(),
            completions_tx,
            completions_rx,
            endpoint: endpoint.into(),
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Send the current form values. Supersedes any submission in flight.
    pub fn submit(&mut self) {
        let request_id = self.tracker.begin();
        self.state.response = ResponseState::Pending { request_id };
        self.state.status_message = Some(format!("Submitting request {request_id}..."));
        tracing::info!("Starting submission {request_id}");

        let api = Arc::clone(&self.api);
        let form = self.state.form.clone();
        let tx = self.completions_tx.clone();
        let task = tokio::spawn(async move {
            let result = api.create_pass(&form).await;
            // The receiver is gone only when the app is shutting down
            let _ = tx.send(SubmissionCompleted { request_id, result });
        });
        self.tracker.attach(request_id, task.abort_handle());
    }

    /// Apply every completion that has arrived since the last call
    pub fn poll_completions(&mut self) {
        while let Ok(completed) = self.completions_rx.try_recv() {
            self.apply_completion(completed);
        }
    }

    /// Update the response panel, ignoring results of superseded requests
    pub fn apply_completion(&mut self, completed: SubmissionCompleted) {
        let SubmissionCompleted { request_id, result } = completed;
        if !self.tracker.complete(request_id) {
            tracing::debug!("Discarding stale result of submission {request_id}");
            return;
        }

        self.state.status_message = Some(match &result {
            Ok(_) => format!("Request {request_id} succeeded"),
            Err(e) => match e.status() {
                Some(code) => format!("Request {request_id} failed (HTTP {code})"),
                None => format!("Request {request_id} failed"),
            },
        });
        self.state.response = ResponseState::completed(result.into());
    }

    /// Clear the form; the last response stays visible
    pub fn reset_form(&mut self) {
        self.state.form.reset();
        self.state.status_message = Some("Form cleared".to_string());
    }

    /// Copy the download link of the last successful submission
    pub fn copy_link(&mut self) {
        let Some(url) = self
            .state
            .response
            .outcome()
            .and_then(|outcome| outcome.download_url())
        else {
            self.state.status_message = Some("No download link to copy".to_string());
            return;
        };

        match copy_to_clipboard(&url) {
            Ok(()) => self.state.status_message = Some("Download link copied".to_string()),
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {e}");
                self.push_error(format!("Failed to copy link: {e}"));
            }
        }
    }

    /// Cancel outstanding work before the app is dropped
    pub fn shutdown(&mut self) {
        if self.tracker.is_pending() {
            tracing::info!("Cancelling in-flight submission");
        }
        self.tracker.abort_all();
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Quit works everywhere, including over the error dialog
        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.quit = true;
            return;
        }

        if self.state.has_error() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        match key.code {
            KeyCode::Char('s') if ctrl => {
                self.submit();
                return;
            }
            KeyCode::Char('r') if ctrl => {
                self.reset_form();
                return;
            }
            KeyCode::Char('y') if ctrl || key.modifiers.contains(COPY_MODIFIER) => {
                self.copy_link();
                return;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.state.form.next_field();
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.form.prev_field();
                return;
            }
            _ => {}
        }

        if self.state.form.is_buttons_row_active() {
            self.handle_buttons_key(key);
        } else {
            self.handle_field_key(key);
        }
    }

    fn handle_buttons_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.state.form.toggle_button();
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.state.form.selected_button {
                FormButton::Create => self.submit(),
                FormButton::Reset => self.reset_form(),
            },
            _ => {}
        }
    }

    /// Edit the active input; every change is written back with `set_field`
    fn handle_field_key(&mut self, key: KeyEvent) {
        let form = &mut self.state.form;
        let Some(name) = form.active_name() else {
            return;
        };
        let mut value = form.get(name).to_string();

        match key.code {
            KeyCode::Enter if form.is_active_field_multiline() => value.push('\n'),
            KeyCode::Enter => {
                form.next_field();
                return;
            }
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => value.clear(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                value.push(c)
            }
            _ => return,
        }

        form.set_field(name, value);
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CreatePassResponse, MockPassApi, SubmitError};
    use crate::state::{FieldName, PassForm, RequestId, SubmissionOutcome, BUTTONS_ROW};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn idle_app() -> App {
        App::new(Arc::new(MockPassApi::new()), "http://localhost:8080/create")
    }

    async fn wait_for_completion(app: &mut App) {
        let completed = app.completions_rx.recv().await.unwrap();
        app.apply_completion(completed);
    }

    #[test]
    fn test_typing_fills_fields_in_order() {
        let mut app = idle_app();
        type_text(&mut app, "premium");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Acme BV");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "NL91ABNA0417164300");

        let form = &app.state.form;
        assert_eq!(form.get(FieldName::Plan), "premium");
        assert_eq!(form.get(FieldName::CompanyName), "Acme BV");
        assert_eq!(form.get(FieldName::Iban), "NL91ABNA0417164300");
        assert_eq!(form.get(FieldName::Bic), "");
    }

    #[test]
    fn test_enter_in_address_inserts_newline() {
        let mut app = idle_app();
        app.state.form.set_active_field(FieldName::Address.index());
        type_text(&mut app, "Main 1");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "Amsterdam");
        assert_eq!(app.state.form.get(FieldName::Address), "Main 1\nAmsterdam");
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut app = idle_app();
        type_text(&mut app, "basic");
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.state.form.get(FieldName::Plan), "basi");
        app.handle_key(ctrl('u'));
        assert_eq!(app.state.form.get(FieldName::Plan), "");
    }

    #[test]
    fn test_quit_while_error_dialog_is_open() {
        let mut app = idle_app();
        app.push_error("Failed to copy link");
        app.handle_key(ctrl('c'));
        assert!(app.should_quit());

        let mut app = idle_app();
        app.push_error("Failed to copy link");
        app.handle_key(ctrl('q'));
        assert!(app.should_quit());
        assert!(app.state.has_error());
    }

    #[test]
    fn test_edits_preserve_other_fields() {
        let mut app = idle_app();
        app.state.form.set_field(FieldName::Iban, "NL91ABNA0417164300");
        app.state.form.set_active_field(FieldName::Bic.index());
        type_text(&mut app, "ABNANL2A");
        app.handle_key(key(KeyCode::Backspace));

        assert_eq!(app.state.form.get(FieldName::Bic), "ABNANL2");
        assert_eq!(app.state.form.get(FieldName::Iban), "NL91ABNA0417164300");
    }

    #[test]
    fn test_typing_on_buttons_row_is_ignored() {
        let mut app = idle_app();
        app.state.form.set_active_field(BUTTONS_ROW);
        type_text(&mut app, "xyz");
        app.handle_key(key(KeyCode::Backspace));
        assert!(app.state.form.fields().all(|(_, value)| value.is_empty()));
    }

    #[test]
    fn test_ctrl_keys_are_not_typed() {
        let mut app = idle_app();
        app.handle_key(ctrl('x'));
        assert_eq!(app.state.form.get(FieldName::Plan), "");
    }

    #[test]
    fn test_quit_shortcuts() {
        let mut app = idle_app();
        assert!(!app.should_quit());
        app.handle_key(ctrl('q'));
        assert!(app.should_quit());

        let mut app = idle_app();
        app.handle_key(ctrl('c'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_buttons_row_toggle_and_reset() {
        let mut app = idle_app();
        type_text(&mut app, "premium");
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.state.form.active_field(), BUTTONS_ROW);

        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.state.form.selected_button, FormButton::Reset);
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.state.form, PassForm::new());
        assert_eq!(app.state.status_message.as_deref(), Some("Form cleared"));
    }

    #[test]
    fn test_error_dialog_swallows_keys_until_dismissed() {
        let mut app = idle_app();
        app.push_error("boom");
        type_text(&mut app, "x");
        assert_eq!(app.state.form.get(FieldName::Plan), "");
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.state.has_error());
    }

    #[test]
    fn test_copy_without_link_sets_status() {
        let mut app = idle_app();
        app.copy_link();
        assert_eq!(
            app.state.status_message.as_deref(),
            Some("No download link to copy")
        );
        assert!(!app.state.has_error());
    }

    #[tokio::test]
    async fn test_submit_success_updates_response() {
        let mut api = MockPassApi::new();
        api.expect_create_pass()
            .withf(|form: &PassForm| form.get(FieldName::Plan) == "premium")
            .times(1)
            .returning(|_| {
                Ok(CreatePassResponse {
                    link: Some("passes/abc123".to_string()),
                    message: Some("created".to_string()),
                    pass_id: None,
                })
            });
        let mut app = App::new(Arc::new(api), "http://localhost:8080/create");
        type_text(&mut app, "premium");

        app.handle_key(ctrl('s'));
        assert!(app.state.response.is_pending());

        wait_for_completion(&mut app).await;
        let outcome = app.state.response.outcome().unwrap();
        assert_eq!(outcome.message(), "created");
        assert_eq!(
            outcome.download_url().as_deref(),
            Some("http://passes/abc123")
        );
    }

    #[tokio::test]
    async fn test_submit_empty_form_is_not_blocked() {
        let mut api = MockPassApi::new();
        api.expect_create_pass()
            .withf(|form: &PassForm| form.fields().all(|(_, value)| value.is_empty()))
            .times(1)
            .returning(|_| Ok(CreatePassResponse::default()));
        let mut app = App::new(Arc::new(api), "http://localhost:8080/create");

        app.state.form.set_active_field(BUTTONS_ROW);
        app.handle_key(key(KeyCode::Enter));

        wait_for_completion(&mut app).await;
        assert!(app.state.response.outcome().unwrap().is_success());
    }

    #[tokio::test]
    async fn test_submit_rejection_shows_message_and_fields() {
        let mut api = MockPassApi::new();
        api.expect_create_pass().returning(|_| {
            Err(SubmitError::Rejected {
                status: 400,
                message: "invalid".to_string(),
                fields: Some("iban".to_string()),
            })
        });
        let mut app = App::new(Arc::new(api), "http://localhost:8080/create");

        app.submit();
        wait_for_completion(&mut app).await;

        assert_eq!(
            app.state.response.outcome(),
            Some(&SubmissionOutcome::Failure {
                message: "invalid: iban".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_submit_network_failure_is_visible() {
        let mut api = MockPassApi::new();
        api.expect_create_pass()
            .returning(|_| Err(SubmitError::Network("connection refused".to_string())));
        let mut app = App::new(Arc::new(api), "http://localhost:8080/create");

        app.submit();
        wait_for_completion(&mut app).await;

        let outcome = app.state.response.outcome().unwrap();
        assert!(!outcome.is_success());
        assert_eq!(
            outcome.message(),
            "Could not reach server: connection refused"
        );
        assert_eq!(
            app.state.status_message.as_deref(),
            Some("Request #1 failed")
        );
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut app = idle_app();
        let first = app.tracker.begin();
        let second = app.tracker.begin();
        app.state.response = ResponseState::Pending { request_id: second };

        app.apply_completion(SubmissionCompleted {
            request_id: second,
            result: Ok(CreatePassResponse {
                message: Some("second".to_string()),
                ..Default::default()
            }),
        });
        app.apply_completion(SubmissionCompleted {
            request_id: first,
            result: Ok(CreatePassResponse {
                message: Some("first".to_string()),
                ..Default::default()
            }),
        });

        assert_eq!(app.state.response.outcome().unwrap().message(), "second");
    }

    /// Answers each request only when the test releases its plan's gate
    struct GatedApi {
        gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl PassApi for GatedApi {
        async fn create_pass(
            &self,
            form: &PassForm,
        ) -> Result<CreatePassResponse, SubmitError> {
            let plan = form.get(FieldName::Plan).to_string();
            let gate = self.gates.lock().unwrap().remove(&plan);
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(CreatePassResponse {
                message: Some(plan),
                ..Default::default()
            })
        }
    }

    #[tokio::test]
    async fn test_rapid_resubmission_last_submitted_wins() {
        let (release_first, first_gate) = oneshot::channel();
        let (release_second, second_gate) = oneshot::channel();
        let gates = HashMap::from([
            ("first".to_string(), first_gate),
            ("second".to_string(), second_gate),
        ]);
        let mut app = App::new(
            Arc::new(GatedApi {
                gates: Mutex::new(gates),
            }),
            "http://localhost:8080/create",
        );

        app.state.form.set_field(FieldName::Plan, "first");
        app.submit();
        app.state.form.set_field(FieldName::Plan, "second");
        app.submit();
        assert_eq!(
            app.state.response,
            ResponseState::Pending {
                request_id: RequestId(2)
            }
        );

        let _ = release_second.send(());
        // The first task was aborted; releasing it has no receiver left
        let _ = release_first.send(());

        wait_for_completion(&mut app).await;
        assert_eq!(app.state.response.outcome().unwrap().message(), "second");

        tokio::task::yield_now().await;
        app.poll_completions();
        assert_eq!(app.state.response.outcome().unwrap().message(), "second");
    }

    #[tokio::test]
    async fn test_shutdown_cancels_in_flight_request() {
        let (_release, gate) = oneshot::channel::<()>();
        let api = GatedApi {
            gates: Mutex::new(HashMap::from([(String::new(), gate)])),
        };
        let mut app = App::new(Arc::new(api), "http://localhost:8080/create");

        app.submit();
        app.shutdown();

        tokio::task::yield_now().await;
        app.poll_completions();
        assert!(app.state.response.is_pending());
        assert!(app.state.response.outcome().is_none());
    }
}

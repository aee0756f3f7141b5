//! Request sequencing for form submissions
//!
//! Every submission gets a monotonically increasing [`RequestId`]. Only the
//! most recently started request may update the response panel: starting a
//! new one aborts the previous task, and completions carrying an older id
//! are dropped.

use crate::api::{CreatePassResponse, SubmitError};
use tokio::task::AbortHandle;

/// Identifier of one submission, ordered by start time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Message sent from a submission task back to the event loop
#[derive(Debug)]
pub struct SubmissionCompleted {
    pub request_id: RequestId,
    pub result: Result<CreatePassResponse, SubmitError>,
}

/// Tracks the single submission allowed to be in flight
#[derive(Debug, Default)]
pub struct SubmissionTracker {
    last_issued: u64,
    current: Option<RequestId>,
    in_flight: Option<AbortHandle>,
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new submission, cancelling whatever was in flight
    pub fn begin(&mut self) -> RequestId {
        if let Some(previous) = self.current {
            tracing::info!("Superseding submission {previous}");
        }
        self.abort_in_flight();
        self.last_issued += 1;
        let id = RequestId(self.last_issued);
        self.current = Some(id);
        id
    }

    /// Attach the task running `id` so it can be cancelled later
    pub fn attach(&mut self, id: RequestId, handle: AbortHandle) {
        if self.current == Some(id) {
            self.in_flight = Some(handle);
        } else {
            handle.abort();
        }
    }

    /// Returns true if `id` is the current submission; it is then finished
    pub fn complete(&mut self, id: RequestId) -> bool {
        if self.current != Some(id) {
            return false;
        }
        self.current = None;
        self.in_flight = None;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.current.is_some()
    }

    /// Cancel the in-flight submission, if any, and forget it
    pub fn abort_all(&mut self) {
        self.abort_in_flight();
        self.current = None;
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

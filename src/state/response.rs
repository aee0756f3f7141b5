//! Response state shown below the form

use super::submission::RequestId;
use crate::api::{CreatePassResponse, SubmitError};
use chrono::{DateTime, Local};

/// Result of one submission, in a single shape for success and failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success {
        link: String,
        message: String,
        pass_id: Option<String>,
    },
    Failure {
        message: String,
    },
}

impl SubmissionOutcome {
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Failure { message } => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Hyperlink target for the pass, only for successes with a link
    pub fn download_url(&self) -> Option<String> {
        match self {
            Self::Success { link, .. } => download_url(link),
            Self::Failure { .. } => None,
        }
    }
}

impl From<Result<CreatePassResponse, SubmitError>> for SubmissionOutcome {
    fn from(result: Result<CreatePassResponse, SubmitError>) -> Self {
        match result {
            Ok(created) => Self::Success {
                link: created.link.unwrap_or_default(),
                message: created.message.unwrap_or_default(),
                pass_id: created.pass_id,
            },
            Err(err) => Self::Failure {
                message: err.to_string(),
            },
        }
    }
}

/// Build the download URL; bare links get an `http://` prefix
pub fn download_url(link: &str) -> Option<String> {
    if link.is_empty() {
        None
    } else if link.starts_with("http://") || link.starts_with("https://") {
        Some(link.to_string())
    } else {
        Some(format!("http://{link}"))
    }
}

/// What the response panel currently shows. Always replaced whole.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResponseState {
    #[default]
    Idle,
    Pending {
        request_id: RequestId,
    },
    Completed {
        outcome: SubmissionOutcome,
        completed_at: DateTime<Local>,
    },
}

impl ResponseState {
    pub fn completed(outcome: SubmissionOutcome) -> Self {
        Self::Completed {
            outcome,
            completed_at: Local::now(),
        }
    }

    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        match self {
            Self::Completed { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_success_outcome() {
        let outcome = SubmissionOutcome::from(Ok(CreatePassResponse {
            link: Some("passes/abc123".to_string()),
            message: Some("created".to_string()),
            pass_id: None,
        }));
        assert!(outcome.is_success());
        assert_eq!(outcome.message(), "created");
        assert_eq!(
            outcome.download_url().as_deref(),
            Some("http://passes/abc123")
        );
    }

    #[test]
    fn test_success_with_missing_fields() {
        let outcome = SubmissionOutcome::from(Ok(CreatePassResponse::default()));
        assert_eq!(
            outcome,
            SubmissionOutcome::Success {
                link: String::new(),
                message: String::new(),
                pass_id: None,
            }
        );
        assert!(outcome.download_url().is_none());
    }

    #[test]
    fn test_rejection_outcome() {
        let outcome = SubmissionOutcome::from(Err(SubmitError::Rejected {
            status: 400,
            message: "invalid".to_string(),
            fields: Some("iban".to_string()),
        }));
        assert_eq!(
            outcome,
            SubmissionOutcome::Failure {
                message: "invalid: iban".to_string()
            }
        );
        assert!(outcome.download_url().is_none());
    }

    #[test]
    fn test_network_failure_is_distinguishable() {
        let outcome = SubmissionOutcome::from(Err(SubmitError::Network(
            "connection refused".to_string(),
        )));
        assert!(!outcome.is_success());
        assert!(!outcome.message().is_empty());
    }

    #[test]
    fn test_download_url_keeps_absolute_links() {
        assert_eq!(
            download_url("https://passes.example.com/p/1.pkpass").as_deref(),
            Some("https://passes.example.com/p/1.pkpass")
        );
        assert_eq!(
            download_url("http://localhost:8080/passes/1.pkpass").as_deref(),
            Some("http://localhost:8080/passes/1.pkpass")
        );
        assert_eq!(download_url(""), None);
    }

    #[test]
    fn test_response_state_accessors() {
        assert!(ResponseState::default().outcome().is_none());
        let state = ResponseState::completed(SubmissionOutcome::Failure {
            message: "x".to_string(),
        });
        assert_eq!(state.outcome().map(|o| o.message()), Some("x"));
        assert!(!state.is_pending());
    }
}

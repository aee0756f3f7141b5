//! Submission error taxonomy

use thiserror::Error;

/// Ways a pass creation request can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The server answered non-2xx with a JSON error body
    #[error("{}", rejection_text(.message, .fields.as_deref()))]
    Rejected {
        status: u16,
        message: String,
        fields: Option<String>,
    },

    /// The server answered non-2xx without a usable error body
    #[error("Request failed with HTTP {0}")]
    Status(u16),

    /// No response was received at all
    #[error("Could not reach server: {0}")]
    Network(String),

    /// A 2xx response whose body could not be decoded
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl SubmitError {
    /// HTTP status of the reply, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Status(status) => Some(*status),
            Self::Network(_) | Self::InvalidResponse(_) => None,
        }
    }
}

fn rejection_text(message: &str, fields: Option<&str>) -> String {
    match fields {
        Some(fields) => format!("{message}: {fields}"),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_with_fields() {
        let err = SubmitError::Rejected {
            status: 400,
            message: "invalid".to_string(),
            fields: Some("iban".to_string()),
        };
        assert_eq!(err.to_string(), "invalid: iban");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_rejected_without_fields() {
        let err = SubmitError::Rejected {
            status: 500,
            message: "Failed to create pass".to_string(),
            fields: None,
        };
        assert_eq!(err.to_string(), "Failed to create pass");
    }

    #[test]
    fn test_rejected_with_empty_fields_keeps_separator() {
        let err = SubmitError::Rejected {
            status: 400,
            message: "invalid".to_string(),
            fields: Some(String::new()),
        };
        assert_eq!(err.to_string(), "invalid: ");
    }

    #[test]
    fn test_status_and_network_messages() {
        assert_eq!(
            SubmitError::Status(502).to_string(),
            "Request failed with HTTP 502"
        );
        assert_eq!(
            SubmitError::Network("connection refused".to_string()).to_string(),
            "Could not reach server: connection refused"
        );
        assert_eq!(SubmitError::Network(String::new()).status(), None);
    }
}

//! HTTP client for the pass creation service
//!
//! Sends the form as `multipart/form-data` and maps the reply onto either a
//! decoded [`CreatePassResponse`] or a [`SubmitError`].

use super::{PassApi, SubmitError};
use crate::config::ServiceSettings;
use crate::state::PassForm;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::multipart;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

/// Successful reply of the pass service
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreatePassResponse {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "passID")]
    pub pass_id: Option<String>,
}

/// Error body of the pass service
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    fields: Option<serde_json::Value>,
}

/// Client for the pass creation endpoint
pub struct PassClient {
    client: reqwest::Client,
    endpoint: Url,
    auth_token: Option<HeaderValue>,
}

impl PassClient {
    /// Create a new client from resolved settings
    ///
    /// Fails when the endpoint is not a URL or the token cannot be sent as a
    /// header value.
    pub fn new(settings: &ServiceSettings) -> Result<Self> {
        let endpoint = Url::parse(&settings.endpoint)
            .with_context(|| format!("Invalid endpoint {:?}", settings.endpoint))?;

        let auth_token = match &settings.auth_token {
            Some(token) => {
                let mut value = HeaderValue::from_str(token)
                    .context("Auth token contains characters not allowed in a header")?;
                value.set_sensitive(true);
                Some(value)
            }
            None => {
                tracing::warn!(
                    "No auth token configured; requests are sent without Authorization"
                );
                None
            }
        };

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            auth_token,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

/// Build the multipart body, one text part per field, empty values included
fn build_multipart(form: &PassForm) -> multipart::Form {
    form.fields()
        .fold(multipart::Form::new(), |body, (name, value)| {
            body.text(name.key(), value.to_string())
        })
}

/// Map a status code and raw body onto the submission result
pub(crate) fn decode_response(
    status: StatusCode,
    body: &str,
) -> Result<CreatePassResponse, SubmitError> {
    if status.is_success() {
        return serde_json::from_str(body)
            .map_err(|e| SubmitError::InvalidResponse(e.to_string()));
    }

    let code = status.as_u16();
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            fields,
        }) => Err(SubmitError::Rejected {
            status: code,
            message,
            fields: fields.and_then(opaque_fields),
        }),
        _ => Err(SubmitError::Status(code)),
    }
}

/// `fields` is kept opaque: strings verbatim, lists comma-joined, objects as JSON
fn opaque_fields(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn network_error(err: &reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        SubmitError::Network("request timed out".to_string())
    } else if err.is_connect() {
        SubmitError::Network(format!("connection failed ({err})"))
    } else {
        SubmitError::Network(err.to_string())
    }
}

#[async_trait]
impl PassApi for PassClient {
    async fn create_pass(&self, form: &PassForm) -> Result<CreatePassResponse, SubmitError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .multipart(build_multipart(form));
        if let Some(token) = &self.auth_token {
            request = request.header(AUTHORIZATION, token.clone());
        }

        tracing::debug!(endpoint = %self.endpoint, "Submitting pass form");

        let response = request.send().await.map_err(|e| {
            tracing::warn!("Pass request failed before a response: {e}");
            network_error(&e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::warn!("Failed to read pass response body: {e}");
            network_error(&e)
        })?;

        let result = decode_response(status, &body);
        match &result {
            Ok(created) => tracing::info!(
                status = status.as_u16(),
                link = created.link.as_deref().unwrap_or(""),
                "Pass created"
            ),
            Err(e) => tracing::warn!(status = status.as_u16(), "Pass creation rejected: {e}"),
        }
        result
    }
}

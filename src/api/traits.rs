//! Trait abstraction for the pass service to enable mocking in tests

use super::{CreatePassResponse, SubmitError};
use crate::state::PassForm;
use async_trait::async_trait;

/// Operations offered by the pass creation service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PassApi: Send + Sync {
    /// Submit the form as multipart data and decode the server's answer
    async fn create_pass(&self, form: &PassForm) -> Result<CreatePassResponse, SubmitError>;
}

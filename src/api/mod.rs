//! Client module for the pass creation service

mod client;
mod error;
mod traits;

pub use client::{CreatePassResponse, PassClient};
pub use error::SubmitError;
pub use traits::PassApi;

#[cfg(test)]
pub use traits::MockPassApi;

//! Errors that abort a submission after validation passed.

use extract_client::ClientError;
use thiserror::Error;

use crate::traits::TabError;

/// A submission failed while resolving the page or talking to the backend.
///
/// `Display` is the bare reason; the controller shows it as `Error: <reason>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Tab(#[from] TabError),

    #[error(transparent)]
    Backend(#[from] ClientError),
}

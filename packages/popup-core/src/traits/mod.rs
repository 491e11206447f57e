//! Collaborators the submission flow depends on.
//!
//! - [`ExtractBackend`] - Accepts extraction jobs
//! - [`ActiveTabResolver`] - Reports the URL of the page being viewed

pub mod backend;
pub mod tab;

pub use backend::ExtractBackend;
pub use tab::{ActiveTabResolver, TabError};

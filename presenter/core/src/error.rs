//! Presenter error types
//!
//! Both variants are contract violations reported synchronously to the
//! caller of the offending operation. Animation engine failures have no
//! error path: a missing completion report is covered by `destroy()`.

use thiserror::Error;

/// Errors returned by the content host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresenterError {
    /// Content is already attached to this host
    ///
    /// Hosts hold exactly one content item for their lifetime. Create a new
    /// container to show different content.
    #[error("Attempting to attach panel content after content is already attached")]
    ContentAlreadyAttached,

    /// The requested capability does not exist
    #[error("Not yet implemented: {0}")]
    NotImplemented(&'static str),
}

/// Result alias for presenter operations
pub type Result<T> = std::result::Result<T, PresenterError>;

//! Domain error types for micropost creation and feed queries.
//!
//! Validation failures are structured and recoverable so callers can surface
//! field-level messages; store-level failures are collapsed into a single
//! opaque variant that never leaks storage detail to end users.

use thiserror::Error;

/// A micropost that failed field validation, before anything was written.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("owner is required")]
    MissingOwner,

    #[error("content can't be blank")]
    BlankContent,

    #[error("content is too long (maximum is 140 characters)")]
    ContentTooLong,
}

/// Failure modes of `create_micropost`.
///
/// `CreationFailed` covers any store-level failure during the creation
/// transaction; the transaction is rolled back as a whole, so no partial
/// micropost or edge set is ever left visible.
#[derive(Error, Debug)]
pub enum CreateError {
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),

    #[error("micropost creation failed")]
    CreationFailed(#[source] sqlx::Error),
}

/// Failure modes of feed and listing queries.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("feed is unavailable")]
    FeedUnavailable(#[source] sqlx::Error),
}

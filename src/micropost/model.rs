//! The micropost entity and its field validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::parsing::contains_mention;
use crate::error::ValidationFailure;

/// Maximum content length in characters, counted after Unicode decoding.
pub const MAX_CONTENT_CHARS: usize = 140;

/// A single micropost as stored. `created_at` is set once at creation and
/// never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Micropost {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Micropost {
    /// Returns true if this post addresses anyone syntactically, i.e. its
    /// content contains at least one mention token. Cheap derived check for
    /// rendering code; says nothing about whether any mention resolved.
    pub fn is_reply(&self) -> bool {
        contains_mention(&self.content)
    }
}

/// Explicit ordering for micropost listings. Every query path states its
/// ordering; there is no implicit default.
///
/// Equal timestamps are broken by insertion id so repeated reads of unchanged
/// data return the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOrder {
    NewestFirst,
    OldestFirst,
}

impl PostOrder {
    /// The ORDER BY clause for this ordering, over the `microposts` columns.
    pub(crate) fn sql(&self) -> &'static str {
        match self {
            PostOrder::NewestFirst => "ORDER BY created_at DESC, id DESC",
            PostOrder::OldestFirst => "ORDER BY created_at ASC, id ASC",
        }
    }
}

/// Validates micropost fields in a fixed order: owner present, trimmed
/// content non-blank, content within the length ceiling.
///
/// # Parameters
///
/// - `owner_id`: The posting user's id, if one was supplied
/// - `content`: The raw content as submitted (stored untrimmed on success)
///
/// # Returns
///
/// - `Ok(owner_id)`: All fields valid
/// - `Err(ValidationFailure)`: The first failing check
pub fn validate_micropost(
    owner_id: Option<i64>,
    content: &str,
) -> Result<i64, ValidationFailure> {
    let owner_id = owner_id.ok_or(ValidationFailure::MissingOwner)?;

    if content.trim().is_empty() {
        return Err(ValidationFailure::BlankContent);
    }

    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(ValidationFailure::ContentTooLong);
    }

    Ok(owner_id)
}

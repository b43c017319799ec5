//! Micropost creation: validation, mention resolution, and the atomic
//! post-plus-edges write.
//!
//! Edge derivation is an explicit step of this command rather than a
//! persistence hook, so the transaction boundary and failure path are
//! visible and testable on their own.

use chrono::{DateTime, Utc};
use log::{debug, error, info};
use sqlx::PgPool;

use super::model::{validate_micropost, Micropost};
use super::replies::{create_edges_for_post, resolve_mention_targets};
use crate::error::CreateError;

/// Creates a micropost and its reply edges.
///
/// Validation runs first and returns a structured failure without touching
/// the store. On valid input the mention tokens are parsed and resolved, then
/// the post insert and all edge inserts execute in one transaction: either
/// the post exists with its full edge set, or nothing was written.
///
/// # Parameters
///
/// - `pool`: A reference to the PostgreSQL connection pool
/// - `owner_id`: The posting user's id, if one was supplied
/// - `content`: The raw content as submitted
/// - `now`: The creation timestamp, immutable once stored
///
/// # Returns
///
/// - `Ok(Micropost)`: The stored post
/// - `Err(CreateError::Invalid)`: A field failed validation
/// - `Err(CreateError::CreationFailed)`: The store rejected the transaction;
///   nothing was written
pub async fn create_micropost(
    pool: &PgPool,
    owner_id: Option<i64>,
    content: &str,
    now: DateTime<Utc>,
) -> Result<Micropost, CreateError> {
    let owner_id = validate_micropost(owner_id, content)?;

    // Targets are fixed at parse time; a user deleted after this point keeps
    // its edge.
    let targets = resolve_mention_targets(pool, content)
        .await
        .map_err(CreateError::CreationFailed)?;

    let mut tx = pool.begin().await.map_err(CreateError::CreationFailed)?;

    let micropost: Micropost = sqlx::query_as(
        r#"
        INSERT INTO microposts (user_id, content, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, content, created_at
        "#,
    )
    .bind(owner_id)
    .bind(content)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(CreateError::CreationFailed)?;

    if let Err(e) = create_edges_for_post(&mut tx, micropost.id, &targets).await {
        error!(
            "Edge creation failed for micropost {}, rolling back: {}",
            micropost.id, e
        );
        tx.rollback().await.ok();
        return Err(CreateError::CreationFailed(e));
    }

    tx.commit().await.map_err(CreateError::CreationFailed)?;

    info!(
        "Created micropost {} for user {} with {} reply edges",
        micropost.id,
        owner_id,
        targets.len()
    );
    debug!("Micropost {} content: '{}'", micropost.id, micropost.content);

    Ok(micropost)
}

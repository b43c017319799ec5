//! Reply edge store: the persisted relation between a micropost and the
//! users it addresses.
//!
//! Edges are derived from content exactly once, at creation time, and are
//! never edited independently. The composite primary key on
//! (micropost_id, in_reply_to_id) gives set semantics; inserts go through
//! `ON CONFLICT DO NOTHING` so re-invocation with the same arguments cannot
//! create duplicates.

use log::{debug, info};
use sqlx::{PgPool, Postgres, Transaction};

use super::parsing::distinct_mention_usernames;
use crate::users::resolve_username;

/// Resolves the distinct mention tokens in `content` to user ids.
///
/// One resolution per distinct token; tokens that do not resolve are silently
/// excluded. The returned ids are the exact edge targets for a post with this
/// content.
///
/// # Parameters
///
/// - `pool`: A reference to the PostgreSQL connection pool
/// - `content`: The raw post content to parse
///
/// # Returns
///
/// - `Ok(Vec<i64>)`: Resolved target ids, in first-mention order
/// - `Err(sqlx::Error)`: If a lookup query fails
pub async fn resolve_mention_targets(
    pool: &PgPool,
    content: &str,
) -> Result<Vec<i64>, sqlx::Error> {
    let usernames = distinct_mention_usernames(content);
    let mut targets = Vec::with_capacity(usernames.len());

    for username in &usernames {
        if let Some(user_id) = resolve_username(pool, username).await? {
            targets.push(user_id);
        }
    }

    debug!(
        "Resolved {} of {} mention tokens to edge targets",
        targets.len(),
        usernames.len()
    );
    Ok(targets)
}

/// Inserts one reply edge per target id, inside the caller's transaction.
///
/// Runs in the same atomic unit of work as the micropost insert: if any edge
/// insert fails, the caller rolls back and no post is left visible without
/// its derivable edges.
///
/// # Parameters
///
/// - `tx`: The open creation transaction
/// - `micropost_id`: The post the edges belong to
/// - `target_ids`: Resolved user ids the post addresses
pub async fn create_edges_for_post(
    tx: &mut Transaction<'_, Postgres>,
    micropost_id: i64,
    target_ids: &[i64],
) -> Result<(), sqlx::Error> {
    for target_id in target_ids {
        sqlx::query(
            r#"
            INSERT INTO replies (micropost_id, in_reply_to_id)
            VALUES ($1, $2)
            ON CONFLICT (micropost_id, in_reply_to_id) DO NOTHING
            "#,
        )
        .bind(micropost_id)
        .bind(target_id)
        .execute(&mut **tx)
        .await?;
    }

    if !target_ids.is_empty() {
        info!(
            "Recorded {} reply edges for micropost {}",
            target_ids.len(),
            micropost_id
        );
    }
    Ok(())
}

/// Returns the ids of all users a micropost addresses.
pub async fn mentioned_user_ids(pool: &PgPool, micropost_id: i64) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT in_reply_to_id
        FROM replies
        WHERE micropost_id = $1
        ORDER BY in_reply_to_id
        "#,
    )
    .bind(micropost_id)
    .fetch_all(pool)
    .await
}

//! Feed composition and micropost listing queries.
//!
//! A post belongs in a viewer's feed if any of four rules hold: the viewer
//! authored it, a followed user authored it, it addresses the viewer, or it
//! addresses someone the viewer follows. The union and deduplication are
//! pushed into a single set-based query so high-activity viewers never
//! require merging result sets in process, and so the result reflects one
//! consistent snapshot of the store.

use log::{debug, info};
use serde::Serialize;
use sqlx::PgPool;

use super::model::{Micropost, PostOrder};
use crate::error::FeedError;

/// Computes the ordered, deduplicated feed for a viewer.
///
/// Ordering is newest-first by `created_at`, with insertion id as the stable
/// tie-break; a post qualifying through several rules appears exactly once.
///
/// # Parameters
///
/// - `pool`: A reference to the PostgreSQL connection pool
/// - `viewer_id`: The user whose feed to compute
///
/// # Returns
///
/// - `Ok(Vec<Micropost>)`: The feed, newest first
/// - `Err(FeedError::FeedUnavailable)`: The store failed; no partial feed is
///   returned
pub async fn compute_feed(pool: &PgPool, viewer_id: i64) -> Result<Vec<Micropost>, FeedError> {
    debug!("Computing feed for viewer {}", viewer_id);

    let posts: Vec<Micropost> = sqlx::query_as(
        r#"
        SELECT DISTINCT m.id, m.user_id, m.content, m.created_at
        FROM microposts m
        LEFT JOIN replies r ON r.micropost_id = m.id
        WHERE m.user_id = $1
           OR m.user_id IN (SELECT followed_id FROM relationships
                            WHERE follower_id = $1)
           OR r.in_reply_to_id = $1
           OR r.in_reply_to_id IN (SELECT followed_id FROM relationships
                                   WHERE follower_id = $1)
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(viewer_id)
    .fetch_all(pool)
    .await
    .map_err(FeedError::FeedUnavailable)?;

    info!("Feed for viewer {} has {} posts", viewer_id, posts.len());
    Ok(posts)
}

/// Lists one user's own posts in the given order.
pub async fn posts_by_user(
    pool: &PgPool,
    user_id: i64,
    order: PostOrder,
) -> Result<Vec<Micropost>, FeedError> {
    let sql = format!(
        r#"
        SELECT id, user_id, content, created_at
        FROM microposts
        WHERE user_id = $1
        {}
        "#,
        order.sql()
    );

    sqlx::query_as(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(FeedError::FeedUnavailable)
}

/// A micropost joined with its author's username, for display listings.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PostWithAuthor {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Lists the most recent posts across all users, author attached.
pub async fn recent_posts(
    pool: &PgPool,
    order: PostOrder,
    limit: i64,
) -> Result<Vec<PostWithAuthor>, FeedError> {
    let sql = format!(
        r#"
        SELECT m.id, m.user_id, u.username, m.content, m.created_at
        FROM microposts m
        JOIN users u ON u.id = m.user_id
        {}
        LIMIT $1
        "#,
        order.sql()
    );

    sqlx::query_as(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(FeedError::FeedUnavailable)
}

//! Follow graph store: who follows whom.
//!
//! The feed engine only reads this relation; writes exist for the operator
//! script and tests. Rows are (follower_id, followed_id) pairs with set
//! semantics enforced by the composite primary key.

use log::info;
use sqlx::PgPool;

/// Records that `follower_id` follows `followed_id`. Idempotent: following
/// an already-followed user is a no-op.
pub async fn follow(pool: &PgPool, follower_id: i64, followed_id: i64) -> Result<(), sqlx::Error> {
    info!("User {} follows user {}", follower_id, followed_id);

    sqlx::query(
        r#"
        INSERT INTO relationships (follower_id, followed_id, created_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (follower_id, followed_id) DO NOTHING
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Removes the follow relationship, if present.
pub async fn unfollow(
    pool: &PgPool,
    follower_id: i64,
    followed_id: i64,
) -> Result<(), sqlx::Error> {
    info!("User {} unfollows user {}", follower_id, followed_id);

    sqlx::query(
        r#"
        DELETE FROM relationships
        WHERE follower_id = $1 AND followed_id = $2
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Returns true if `follower_id` currently follows `followed_id`.
pub async fn is_following(
    pool: &PgPool,
    follower_id: i64,
    followed_id: i64,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM relationships
        WHERE follower_id = $1 AND followed_id = $2
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// Returns the ids of all users `follower_id` follows.
pub async fn followed_user_ids(pool: &PgPool, follower_id: i64) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT followed_id
        FROM relationships
        WHERE follower_id = $1
        "#,
    )
    .bind(follower_id)
    .fetch_all(pool)
    .await
}

//! Database module: connection pool and schema bootstrap.
//!
//! This module provides the PostgreSQL connection pool used by every store
//! and the idempotent schema setup for the users, microposts, replies, and
//! relationships tables.

use log::{debug, info};
use sqlx::PgPool;
use std::env;

/// Establishes a connection to the PostgreSQL database using DATABASE_URL.
///
/// # Returns
///
/// - `Ok(PgPool)`: A connection pool to the database
/// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If the connection fails or DATABASE_URL is missing
pub async fn get_db_pool() -> Result<PgPool, Box<dyn std::error::Error + Send + Sync>> {
    let database_url =
        env::var("DATABASE_URL").map_err(|_| "DATABASE_URL environment variable is not set")?;

    info!("Connecting to PostgreSQL database");
    debug!(
        "Database URL (masked): {}...",
        &database_url[..std::cmp::min(database_url.len(), 20)]
    );

    let pool = PgPool::connect(&database_url).await?;
    info!("Successfully connected to PostgreSQL database");

    Ok(pool)
}

/// Creates the schema if it does not exist yet.
///
/// Deleting a user cascades to their microposts, and deleting a micropost
/// cascades to its reply edges. `replies.in_reply_to_id` deliberately has no
/// foreign key: edges are historical snapshots of who was addressed at post
/// time and survive target-user deletion. The composite primary key on
/// replies enforces at most one edge per (post, target) pair.
///
/// # Parameters
///
/// - `pool`: A reference to the PostgreSQL connection pool
///
/// # Returns
///
/// - `Ok(())`: The schema is in place
/// - `Err(sqlx::Error)`: If any DDL statement fails
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Ensuring database schema");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS microposts (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
            content TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS index_microposts_on_user_id_and_created_at
        ON microposts (user_id, created_at DESC)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS replies (
            micropost_id BIGINT NOT NULL REFERENCES microposts (id) ON DELETE CASCADE,
            in_reply_to_id BIGINT NOT NULL,
            PRIMARY KEY (micropost_id, in_reply_to_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS index_replies_on_in_reply_to_id
        ON replies (in_reply_to_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS relationships (
            follower_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
            followed_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            PRIMARY KEY (follower_id, followed_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema is up to date");
    Ok(())
}

//! User directory: creation, lookup, and mention resolution.
//!
//! Usernames are unique and looked up with case-sensitive exact matching.
//! A mention token only counts as a real mention if its username resolves
//! here; resolution failures are not errors, they simply exclude the token
//! from edge creation and link rendering.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use sqlx::PgPool;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Creates a new user with a unique username.
///
/// # Parameters
///
/// - `pool`: A reference to the PostgreSQL connection pool
/// - `username`: The unique handle mention tokens resolve against
/// - `name`: The display name
///
/// # Returns
///
/// - `Ok(User)`: The stored user, id and timestamp assigned by the database
/// - `Err(sqlx::Error)`: If the insert fails (e.g. username already taken)
pub async fn create_user(pool: &PgPool, username: &str, name: &str) -> Result<User, sqlx::Error> {
    info!("Creating user @{}", username);

    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (username, name, created_at)
        VALUES ($1, $2, NOW())
        RETURNING id, username, name, created_at
        "#,
    )
    .bind(username)
    .bind(name)
    .fetch_one(pool)
    .await?;

    info!("Created user @{} with id {}", user.username, user.id);
    Ok(user)
}

/// Fetches a user by id.
pub async fn find_user(pool: &PgPool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, username, name, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Resolves a username to a user id with case-sensitive exact matching.
///
/// # Parameters
///
/// - `pool`: A reference to the PostgreSQL connection pool
/// - `username`: The handle to look up, without the `@` prefix
///
/// # Returns
///
/// - `Ok(Some(id))`: The username belongs to an existing user
/// - `Ok(None)`: No such user; not an error
/// - `Err(sqlx::Error)`: If the query fails
pub async fn resolve_username(pool: &PgPool, username: &str) -> Result<Option<i64>, sqlx::Error> {
    let id: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT id
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    match id {
        Some(id) => debug!("Resolved username @{} to user {}", username, id),
        None => debug!("Username @{} does not resolve", username),
    }

    Ok(id)
}

/// The profile path for a user, used as the href of rendered mention links.
pub fn profile_url(user_id: i64) -> String {
    format!("/users/{}", user_id)
}

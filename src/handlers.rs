//! HTTP route handlers for the microfeed service.
//!
//! This module contains all the HTTP route handler functions that process
//! incoming requests and return appropriate responses. Validation failures
//! come back as structured 422 responses; store failures are reported as a
//! generic 500 without internal storage detail.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Json},
};
use chrono::Utc;
use log::{error, info};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::config::get_root_page_limit;
use crate::error::CreateError;
use crate::micropost::{
    compute_feed, create_micropost, posts_by_user, recent_posts,
    render_with_mention_links_and_wrap, PostOrder,
};

/// Handles GET requests to the `/health` endpoint.
///
/// This endpoint provides a health check for the service, returning the
/// current status and service name. It's commonly used by load balancers and
/// monitoring systems to verify that the service is running and responsive.
///
/// # Returns
///
/// A JSON response containing:
/// - `status`: Always "healthy" when the service is running
/// - `service`: The service name "microfeed"
pub async fn handle_health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "microfeed"}))
}

/// Request body for `POST /microposts`.
///
/// `user_id` stays optional at the boundary so a missing owner surfaces as a
/// validation failure instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct CreateMicropostRequest {
    pub user_id: Option<i64>,
    pub content: String,
}

/// Handles POST requests to the `/microposts` endpoint.
///
/// Creates a micropost for the given user, deriving reply edges from the
/// mention tokens in its content.
///
/// # Returns
///
/// - `201 Created` with the stored micropost on success
/// - `422 Unprocessable Entity` with the field-level message on validation
///   failure
/// - `500 Internal Server Error` if the creation transaction failed; nothing
///   was written
pub async fn handle_create_micropost(
    State(pool): State<PgPool>,
    Json(request): Json<CreateMicropostRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    match create_micropost(&pool, request.user_id, &request.content, Utc::now()).await {
        Ok(micropost) => {
            info!("Micropost {} created via HTTP", micropost.id);
            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "status": "success",
                    "message": "Micropost created",
                    "micropost": micropost,
                })),
            ))
        }
        Err(CreateError::Invalid(failure)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "status": "error",
                "message": "Validation failed",
                "error": failure.to_string(),
            })),
        )),
        Err(CreateError::CreationFailed(e)) => {
            error!("Micropost creation failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": "Failed to create micropost",
                })),
            ))
        }
    }
}

/// Handles GET requests to the `/users/{id}/feed` endpoint.
///
/// Returns the viewer's feed: their own posts, posts by users they follow,
/// and posts addressing them or someone they follow, newest first and
/// deduplicated.
///
/// # Returns
///
/// - `200 OK` with the JSON array of posts
/// - `500 Internal Server Error` if the store failed; no partial feed is
///   returned
pub async fn handle_feed(
    State(pool): State<PgPool>,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match compute_feed(&pool, user_id).await {
        Ok(posts) => Ok(Json(json!({
            "status": "success",
            "feed": posts,
        }))),
        Err(e) => {
            error!("Feed query failed for viewer {}: {}", user_id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": "Feed is unavailable",
                })),
            ))
        }
    }
}

/// Query parameters for micropost listings. Ordering is stated explicitly;
/// an omitted parameter means newest-first, an unknown value is rejected.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub order: Option<String>,
}

fn parse_order(query: &ListQuery) -> Result<PostOrder, (StatusCode, Json<Value>)> {
    match query.order.as_deref() {
        None | Some("newest") => Ok(PostOrder::NewestFirst),
        Some("oldest") => Ok(PostOrder::OldestFirst),
        Some(other) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "status": "error",
                "message": format!("Unknown order '{}', expected 'newest' or 'oldest'", other),
            })),
        )),
    }
}

/// Handles GET requests to the `/users/{id}/microposts` endpoint.
///
/// Lists one user's own posts in the requested order.
pub async fn handle_user_posts(
    State(pool): State<PgPool>,
    Path(user_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let order = parse_order(&query)?;

    match posts_by_user(&pool, user_id, order).await {
        Ok(posts) => Ok(Json(json!({
            "status": "success",
            "microposts": posts,
        }))),
        Err(e) => {
            error!("Listing query failed for user {}: {}", user_id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": "Listing is unavailable",
                })),
            ))
        }
    }
}

/// Handles GET requests to the root `/` endpoint.
///
/// This endpoint displays a table of the most recent microposts across all
/// users, with content passed through the mention-link and soft-wrap
/// renderer. The renderer output is the only markup injected into the page.
///
/// # Returns
///
/// An HTML page with a table displaying the recent posts.
pub async fn handle_root(State(pool): State<PgPool>) -> Result<Html<String>, (StatusCode, String)> {
    let posts = match recent_posts(&pool, PostOrder::NewestFirst, get_root_page_limit()).await {
        Ok(posts) => posts,
        Err(e) => {
            error!("Failed to query recent microposts: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load recent microposts".to_string(),
            ));
        }
    };

    let mut html = String::from(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Microfeed - Recent Microposts</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            margin: 0;
            padding: 20px;
            background-color: #f5f5f5;
        }
        .container {
            max-width: 800px;
            margin: 0 auto;
            background-color: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        h1 {
            color: #333;
            margin-top: 0;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin-top: 20px;
        }
        th, td {
            padding: 12px;
            text-align: left;
            border-bottom: 1px solid #ddd;
        }
        th {
            background-color: #f8f9fa;
            font-weight: 600;
            color: #555;
        }
        tr:hover {
            background-color: #f8f9fa;
        }
        .timestamp {
            white-space: nowrap;
            color: #888;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>Recent Microposts</h1>
        <table>
            <thead>
                <tr>
                    <th>author</th>
                    <th>content</th>
                    <th class="timestamp">posted</th>
                </tr>
            </thead>
            <tbody>
"#,
    );

    for post in posts {
        let rendered = match render_with_mention_links_and_wrap(&pool, &post.content).await {
            Ok(rendered) => rendered,
            Err(e) => {
                error!("Failed to render micropost {}: {}", post.id, e);
                return Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to render microposts".to_string(),
                ));
            }
        };

        html.push_str(&format!(
            "                <tr>\n                    <td>@{}</td>\n                    <td>{}</td>\n                    <td class=\"timestamp\">{}</td>\n                </tr>\n",
            crate::micropost::escape_html(&post.username),
            rendered,
            post.created_at.format("%Y-%m-%d %H:%M"),
        ));
    }

    html.push_str(
        r#"            </tbody>
        </table>
    </div>
</body>
</html>"#,
    );

    Ok(Html(html))
}

//! # Microfeed
//!
//! A microblogging web service: microposts with `@username` mentions, reply
//! edges derived at creation time, and per-viewer feed composition over
//! PostgreSQL.
//!
//! ## Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `PORT`: Server port (defaults to 3000)
//! - `ROOT_PAGE_LIMIT`: Number of posts on the root page (defaults to 50)
//!
//! ## API Endpoints
//!
//! - `GET /`: Recent microposts rendered as HTML
//! - `GET /health`: Returns service health status
//! - `POST /microposts`: Creates a micropost with derived reply edges
//! - `GET /users/:id/feed`: Returns the viewer's feed
//! - `GET /users/:id/microposts`: Lists a user's posts, ordering explicit

use axum::{
    routing::{get, post},
    Router,
};
use log::info;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use microfeed::config::get_server_port;
use microfeed::db::{ensure_schema, get_db_pool};
use microfeed::handlers::{
    handle_create_micropost, handle_feed, handle_health, handle_root, handle_user_posts,
};

/// Main entry point for the microfeed web service.
///
/// This function initializes the logging system, connects to the database,
/// ensures the schema exists, sets up the HTTP server with all routes, and
/// starts listening for incoming requests. The server runs indefinitely
/// until terminated.
///
/// # Logging
///
/// The application uses the `env_logger` crate for structured logging. Log
/// levels can be controlled via the `RUST_LOG` environment variable.
///
/// # Example Usage
///
/// ```bash
/// # Run with default port 3000
/// DATABASE_URL=postgres://localhost/microfeed cargo run
///
/// # Run on custom port with debug logging
/// PORT=8080 RUST_LOG=debug DATABASE_URL=postgres://localhost/microfeed cargo run
/// ```
///
/// # Panics
///
/// This function will panic if:
/// - The database is unreachable or DATABASE_URL is not set
/// - The server port cannot be bound (e.g., port already in use)
#[tokio::main]
async fn main() {
    // Initialize the logging system
    env_logger::init();

    // Connect to the database and make sure the schema exists
    let pool = get_db_pool()
        .await
        .expect("failed to connect to the database");
    ensure_schema(&pool)
        .await
        .expect("failed to ensure the database schema");

    // Build the HTTP application with all routes and middleware
    let app = Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/microposts", post(handle_create_micropost))
        .route("/users/:user_id/feed", get(handle_feed))
        .route("/users/:user_id/microposts", get(handle_user_posts))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(pool);

    // Get the server port and bind address
    let port = get_server_port();
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    info!("Starting microfeed server on {}", addr);

    // Bind to the address and start serving requests
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

//! # Microfeed Library
//!
//! A microblogging core over PostgreSQL: users post short messages
//! ("microposts"), mention each other with `@username` tokens, follow other
//! users, and read a chronological feed. Mention tokens that resolve to
//! existing users are durably recorded as reply edges at creation time, and
//! the feed engine combines authorship, the follow graph, and reply edges
//! into one ordered, deduplicated timeline.
//!
//! ## Features
//!
//! - Mention parsing with a validation boundary (a token only counts once it
//!   resolves to an existing user)
//! - Atomic micropost creation: the post and its derived reply edges commit
//!   or roll back together
//! - Four-way feed union (self, followed authors, replies to the viewer,
//!   replies to followed users) as a single set-based query
//! - Display rendering with soft-wrapping of long tokens and profile links
//!   for resolved mentions, everything else escaped to inert markup
//! - Structured logging
//! - Health check endpoint
//!
//! ## Configuration
//!
//! - `DATABASE_URL`: PostgreSQL connection string
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

pub mod config;
pub mod db;
pub mod error;
pub mod follows;
pub mod handlers;
pub mod micropost;
pub mod users;

// Re-export commonly used types and functions
pub use config::get_server_port;
pub use error::{CreateError, FeedError, ValidationFailure};
pub use handlers::{
    handle_create_micropost, handle_feed, handle_health, handle_root, handle_user_posts,
};
pub use micropost::{
    compute_feed, contains_mention, create_micropost, extract_mention_tokens,
    render_with_mention_links_and_wrap, wrap, Micropost, PostOrder,
};
pub use users::{profile_url, resolve_username, User};

#[cfg(test)]
mod tests;

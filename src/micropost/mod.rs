//! Micropost domain module.
//!
//! This module contains the micropost entity and validator, the mention
//! parser, the reply edge store, the feed query engine, and the
//! rendering-time annotator.

mod compose;
mod feed;
mod model;
mod parsing;
mod render;
mod replies;

// Re-export public API
pub use compose::create_micropost;
pub use feed::{compute_feed, posts_by_user, recent_posts, PostWithAuthor};
pub use model::{validate_micropost, Micropost, PostOrder, MAX_CONTENT_CHARS};
pub use parsing::{contains_mention, distinct_mention_usernames, extract_mention_tokens};
pub use render::{
    add_mention_links, escape_html, render_with_mention_links_and_wrap, wrap, WRAP_WIDTH,
};
pub use replies::mentioned_user_ids;

// Crate-internal re-exports (used by tests and other modules)
#[allow(unused_imports)]
pub(crate) use render::{annotate, link_mentions};
#[allow(unused_imports)]
pub(crate) use replies::{create_edges_for_post, resolve_mention_targets};

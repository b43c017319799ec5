//! Rendering-time transforms for micropost content.
//!
//! Two independent transforms: soft-wrapping of long unbroken tokens, and
//! rewriting resolvable mention tokens into profile links. All
//! content-derived text is escaped to inert markup; the anchor elements this
//! module inserts are the only generated markup in the output.

use std::collections::HashMap;

use sqlx::PgPool;

use super::parsing::{distinct_mention_usernames, mention_regex};
use crate::users::{profile_url, resolve_username};

/// Whitespace-delimited tokens at or above this length get soft-break
/// markers so they cannot stretch the layout.
pub const WRAP_WIDTH: usize = 30;

/// Invisible soft-break marker. Present in the markup, absent from the
/// visible text, so copy-paste reproduces the literal characters.
const ZERO_WIDTH_SPACE: &str = "&#8203;";

/// Escapes HTML special characters so content-derived text stays inert.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn anchor(user_id: i64, token: &str) -> String {
    format!(
        r#"<a href="{}">{}</a>"#,
        profile_url(user_id),
        escape_html(token)
    )
}

/// Escapes a whitespace-delimited token, splitting it into chunks of
/// `WRAP_WIDTH` characters joined by the soft-break marker when it is long
/// enough to need wrapping. Chunking counts characters, not bytes.
fn wrap_long_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < WRAP_WIDTH {
        return escape_html(token);
    }

    chars
        .chunks(WRAP_WIDTH)
        .map(|chunk| escape_html(&chunk.iter().collect::<String>()))
        .collect::<Vec<_>>()
        .join(ZERO_WIDTH_SPACE)
}

/// Soft-wraps long unbroken tokens for display.
///
/// Each whitespace-delimited token shorter than [`WRAP_WIDTH`] passes through
/// unchanged (escaped only); longer tokens are split into `WRAP_WIDTH`-char
/// chunks joined by a zero-width-space marker. Tokens are rejoined with
/// single spaces.
pub fn wrap(content: &str) -> String {
    content
        .split_whitespace()
        .map(wrap_long_token)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves every distinct mention token in `content`, one lookup per token.
async fn resolve_tokens(
    pool: &PgPool,
    content: &str,
) -> Result<HashMap<String, i64>, sqlx::Error> {
    let mut resolved = HashMap::new();
    for username in distinct_mention_usernames(content) {
        if let Some(user_id) = resolve_username(pool, &username).await? {
            resolved.insert(username, user_id);
        }
    }
    Ok(resolved)
}

/// Pure linking pass over raw content: every occurrence of a resolved
/// mention token becomes an anchor, everything else is escaped. Matching is
/// anchored on whole tokens, so `@bob` never matches inside `@bobby` (the
/// scan always takes the longest token at each position).
pub(crate) fn link_mentions(content: &str, resolved: &HashMap<String, i64>) -> String {
    let Some(re) = mention_regex() else {
        return escape_html(content);
    };

    let mut out = String::new();
    let mut last = 0;
    for m in re.find_iter(content) {
        let username = &m.as_str()[1..];
        if let Some(&user_id) = resolved.get(username) {
            out.push_str(&escape_html(&content[last..m.start()]));
            out.push_str(&anchor(user_id, m.as_str()));
            last = m.end();
        }
    }
    out.push_str(&escape_html(&content[last..]));
    out
}

/// Rewrites resolvable mention tokens into profile links.
///
/// Tokens that do not resolve are left as plain, unlinked text. Original
/// spacing is preserved; no wrapping is applied.
///
/// # Parameters
///
/// - `pool`: A reference to the PostgreSQL connection pool
/// - `content`: The raw post content
///
/// # Returns
///
/// - `Ok(String)`: Sanitized markup with anchors for resolved mentions
/// - `Err(sqlx::Error)`: If a resolution lookup fails
pub async fn add_mention_links(pool: &PgPool, content: &str) -> Result<String, sqlx::Error> {
    let resolved = resolve_tokens(pool, content).await?;
    Ok(link_mentions(content, &resolved))
}

/// One whitespace token of the combined transform: resolvable mentions
/// inside the token become anchors; a token with no links falls back to the
/// escape-and-wrap path.
fn annotate_token(token: &str, resolved: &HashMap<String, i64>) -> String {
    let Some(re) = mention_regex() else {
        return wrap_long_token(token);
    };

    let mut out = String::new();
    let mut last = 0;
    let mut linked = false;
    for m in re.find_iter(token) {
        let username = &m.as_str()[1..];
        if let Some(&user_id) = resolved.get(username) {
            out.push_str(&escape_html(&token[last..m.start()]));
            out.push_str(&anchor(user_id, m.as_str()));
            last = m.end();
            linked = true;
        }
    }

    if !linked {
        return wrap_long_token(token);
    }
    out.push_str(&escape_html(&token[last..]));
    out
}

/// Pure combined pass over resolved tokens; see
/// [`render_with_mention_links_and_wrap`].
pub(crate) fn annotate(content: &str, resolved: &HashMap<String, i64>) -> String {
    content
        .split_whitespace()
        .map(|token| annotate_token(token, resolved))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The full display transform: mention linking plus soft-wrapping in a
/// single pass over whitespace tokens.
///
/// Linked tokens keep their exact text inside the anchor; unlinked tokens
/// are escaped and, when long enough, soft-wrapped. Wrapping never splits a
/// linked mention, so the anchor text stays an exact token match.
///
/// # Parameters
///
/// - `pool`: A reference to the PostgreSQL connection pool
/// - `content`: The raw post content
///
/// # Returns
///
/// - `Ok(String)`: Sanitized markup ready for display
/// - `Err(sqlx::Error)`: If a resolution lookup fails
pub async fn render_with_mention_links_and_wrap(
    pool: &PgPool,
    content: &str,
) -> Result<String, sqlx::Error> {
    let resolved = resolve_tokens(pool, content).await?;
    Ok(annotate(content, &resolved))
}

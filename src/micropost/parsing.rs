//! Text parsing and extraction utilities for micropost content.
//!
//! This module contains the pure functions that scan raw post text for
//! mention tokens (`@username`). Parsing is total: any input, including empty
//! or adversarial strings, yields a (possibly empty) token list without
//! panicking. The pattern has no nested quantifiers, so matching cost stays
//! linear in the input length.

use regex::Regex;

/// Pattern for a syntactically valid mention token: `@` followed by one or
/// more ASCII letters, digits, underscores, hyphens, or dots.
const MENTION_PATTERN: &str = r"@[0-9A-Za-z_\-.]+";

pub(crate) fn mention_regex() -> Option<Regex> {
    Regex::new(MENTION_PATTERN).ok()
}

/// Extracts all mention tokens from the given text, in order of first
/// occurrence, `@` prefix included. Repeated tokens are returned repeatedly;
/// consumers that need set semantics use [`distinct_mention_usernames`].
///
/// # Parameters
///
/// - `text`: The raw post content to scan
///
/// # Returns
///
/// All substrings matching the mention pattern, possibly empty.
pub fn extract_mention_tokens(text: &str) -> Vec<String> {
    let Some(re) = mention_regex() else {
        return Vec::new();
    };

    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Extracts the distinct usernames mentioned in the given text, `@` prefix
/// stripped, preserving first-occurrence order. Deduplication is
/// case-sensitive, matching the resolver's exact-match lookup.
///
/// # Parameters
///
/// - `text`: The raw post content to scan
///
/// # Returns
///
/// Each mentioned username at most once, in order of first occurrence.
pub fn distinct_mention_usernames(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for token in extract_mention_tokens(text) {
        let username = token[1..].to_string();
        if !seen.contains(&username) {
            seen.push(username);
        }
    }
    seen
}

/// Returns true if the text contains at least one syntactically valid mention
/// token. This is a pure pattern check, independent of whether any token
/// resolves to an existing user.
pub fn contains_mention(text: &str) -> bool {
    mention_regex().is_some_and(|re| re.is_match(text))
}

//! Configuration module for the microfeed service.
//!
//! This module contains environment variable handling for the HTTP server
//! and the root page listing.

use log::warn;
use std::env;

/// Gets the server port from the PORT environment variable.
///
/// # Returns
///
/// The port number to bind the HTTP server to. Defaults to 3000 if the
/// PORT environment variable is not set.
///
/// # Panics
///
/// Panics if the PORT environment variable is set but cannot be parsed
/// as a valid port number.
///
/// # Example
///
/// ```bash
/// # With PORT=8080 set
/// # get_server_port() returns 8080
///
/// # With no PORT set
/// # get_server_port() returns 3000
/// ```
pub fn get_server_port() -> u16 {
    env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .expect("PORT must be a valid number")
}

/// Gets the number of posts shown on the root page from ROOT_PAGE_LIMIT.
///
/// # Returns
///
/// The listing limit, defaulting to 50. Unparseable values fall back to the
/// default with a warning rather than failing startup.
pub fn get_root_page_limit() -> i64 {
    match env::var("ROOT_PAGE_LIMIT") {
        Ok(value) => match value.parse() {
            Ok(limit) => limit,
            Err(_) => {
                warn!(
                    "ROOT_PAGE_LIMIT value '{}' is not a number, using default 50",
                    value
                );
                50
            }
        },
        Err(_) => 50,
    }
}

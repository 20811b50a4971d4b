// ABOUTME: Optional refresh capability attached to a page.
// ABOUTME: Controls whether the rendered page reloads itself periodically.

use serde::{Deserialize, Serialize};

/// Settings of the refresh behavior.
///
/// Pages carry this as an optional capability; a page without it never
/// refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshSettings {
    /// Reload the page in the browser after `ttl` seconds
    pub enable_refresh: bool,

    /// Seconds between reloads
    pub ttl: u32,
}

impl RefreshSettings {
    pub const DEFAULT_TTL: u32 = 300;

    pub fn enabled(ttl: u32) -> Self {
        Self {
            enable_refresh: true,
            ttl,
        }
    }
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            enable_refresh: false,
            ttl: Self::DEFAULT_TTL,
        }
    }
}

//! Utility functions and helpers.

pub mod http;

use std::sync::LazyLock;

use regex::Regex;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://\S+").expect("URL pattern is a valid regex")
});

/// Find the first http(s) URL in free text. The match runs to the next whitespace.
pub fn extract_first_url(text: &str) -> Option<&str> {
    URL_PATTERN.find(text).map(|m| m.as_str())
}

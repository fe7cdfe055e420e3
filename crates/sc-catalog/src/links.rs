//! Display-ready references for artifacts and external links.

use serde::{Deserialize, Serialize};

const MAX_PATH_CHARS: usize = 30;
const TRUNCATED_PATH_CHARS: usize = 27;

/// Normalized `{url, label}` view over an artifact URI or external link URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    pub url: String,
    pub label: String,
    pub external: bool,
}

impl LinkRef {
    /// Build a reference, deriving a label from the location when none is
    /// given. Returns `None` for a blank location.
    pub fn new(location: &str, label: Option<&str>) -> Option<Self> {
        let location = location.trim();
        if location.is_empty() {
            return None;
        }
        let label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| label_from_location(location));
        Some(Self {
            url: location.to_string(),
            label,
            external: is_external(location),
        })
    }
}

fn is_external(location: &str) -> bool {
    location.starts_with("http")
}

/// Short label: `host/path` for web URLs (long paths truncated), the last
/// path segment for filesystem locations.
pub fn label_from_location(location: &str) -> String {
    if is_external(location) {
        return web_label(location).unwrap_or_else(|| location.to_string());
    }
    location
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(location)
        .to_string()
}

fn web_label(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("://")?;
    let rest = rest.split(['?', '#']).next().unwrap_or(rest);
    let (authority, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, "/"),
    };
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);
    if host.is_empty() {
        return None;
    }

    let short_path = if path.chars().count() > MAX_PATH_CHARS {
        let head: String = path.chars().take(TRUNCATED_PATH_CHARS).collect();
        format!("{}…", head.strip_suffix('/').unwrap_or(&head))
    } else {
        path.to_string()
    };
    Some(format!("{}{}", host, short_path))
}

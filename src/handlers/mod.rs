pub mod admin;
pub mod auth;
pub mod store;

use astra::Request;

/// Read the flash notice carried across a redirect.
pub fn flash_from(req: &Request) -> Option<String> {
    crate::forms::parse_query(req).remove("flash")
}

/// Append a flash notice to a redirect target.
pub fn with_flash(path: &str, message: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    if path.contains('?') {
        format!("{path}&flash={encoded}")
    } else {
        format!("{path}?flash={encoded}")
    }
}

/// Page number from the query string, clamped to >= 1.
pub fn page_from(query: &std::collections::HashMap<String, String>) -> u32 {
    query
        .get("page")
        .and_then(|p| p.parse::<u32>().ok())
        .unwrap_or(1)
        .max(1)
}

pub fn keyword_from(query: &std::collections::HashMap<String, String>) -> String {
    query.get("q").cloned().unwrap_or_default()
}

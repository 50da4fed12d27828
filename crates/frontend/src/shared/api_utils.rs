//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Build a full API URL from the configured base and an endpoint path
///
/// An empty base keeps the path relative, so requests go to the page's own
/// origin.
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::api_url;
///
/// assert_eq!(api_url("", "/api/login"), "/api/login");
/// assert_eq!(api_url("https://example.com/", "/api/login"), "https://example.com/api/login");
/// ```
pub fn api_url(api_base: &str, path: &str) -> String {
    let base = api_base.trim_end_matches('/');
    if base.is_empty() {
        return path.to_string();
    }
    format!("{}/{}", base, path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_when_base_empty() {
        assert_eq!(api_url("", "/api/signup"), "/api/signup");
    }

    #[test]
    fn test_joins_single_slash() {
        assert_eq!(
            api_url("http://127.0.0.1:3000", "/api/signup"),
            "http://127.0.0.1:3000/api/signup"
        );
        assert_eq!(
            api_url("http://127.0.0.1:3000/", "/api/signup"),
            "http://127.0.0.1:3000/api/signup"
        );
    }
}

//! API utilities for frontend-backend communication

/// Join the configured API base with an endpoint path
///
/// ```
/// use dashboard_frontend::shared::api_utils::api_url;
///
/// assert_eq!(api_url("/api/", "/ads/compare"), "/api/ads/compare");
/// assert_eq!(api_url("https://host/api", "ads/compare"), "https://host/api/ads/compare");
/// ```
pub fn api_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, path)
}

/// Append an encoded query string, if any
pub fn with_query(url: String, query: &str) -> String {
    if query.is_empty() {
        url
    } else {
        format!("{}?{}", url, query)
    }
}

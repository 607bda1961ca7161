use serde_json::Value;
use thiserror::Error;

const GENERIC_MESSAGE: &str = "Failed to load report data. Please try again.";

/// Error codes the backend uses for a missing third-party connection
const NOT_CONNECTED_CODES: [&str; 2] = ["google_not_connected", "integration_not_connected"];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportsError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Failed to encode request: {0}")]
    Serialize(String),

    #[error("Request timed out after {after_ms} ms")]
    Timeout { after_ms: u32 },

    /// Superseded by a newer request
    #[error("Request cancelled")]
    Cancelled,

    #[error("{provider} is not connected: {message}")]
    IntegrationNotConnected { provider: String, message: String },

    /// Rejected before any request was sent
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),
}

impl ReportsError {
    /// Text for the error banner
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { message, .. } if !message.is_empty() => message.clone(),
            Self::Http { status, .. } => format!("{} (HTTP {})", GENERIC_MESSAGE, status),
            Self::Timeout { .. } => "The request took too long. Please try again.".to_string(),
            Self::IntegrationNotConnected { provider, .. } => {
                format!("Connect your {} account to continue.", provider)
            }
            Self::Network(message) if !message.is_empty() => message.clone(),
            Self::InvalidDateRange(message) => message.clone(),
            _ => GENERIC_MESSAGE.to_string(),
        }
    }

    /// Caller should offer a connect flow instead of showing a banner
    pub fn is_integration_auth(&self) -> bool {
        matches!(self, Self::IntegrationNotConnected { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Maps a non-2xx response body to an error.
    ///
    /// `provider` is set for endpoints backed by a third-party account;
    /// for those a 401/403 means the account is not connected.
    pub fn from_response(status: u16, body: &str, provider: Option<&str>) -> Self {
        let json: Option<Value> = serde_json::from_str(body).ok();
        let message = json
            .as_ref()
            .and_then(server_message)
            .unwrap_or_else(|| body.trim().chars().take(300).collect());

        let code = json.as_ref().and_then(error_code);
        let not_connected = code
            .as_deref()
            .is_some_and(|c| NOT_CONNECTED_CODES.contains(&c));

        if let Some(provider) = provider {
            if not_connected || status == 401 || status == 403 {
                return Self::IntegrationNotConnected {
                    provider: provider.to_string(),
                    message,
                };
            }
        } else if not_connected {
            return Self::IntegrationNotConnected {
                provider: "Integration".to_string(),
                message,
            };
        }

        Self::Http { status, message }
    }
}

fn server_message(json: &Value) -> Option<String> {
    ["detail", "message", "error"].iter().find_map(|key| match json.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(inner) => inner
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    })
}

fn error_code(json: &Value) -> Option<String> {
    let direct = ["error_code", "code"]
        .iter()
        .find_map(|key| json.get(*key).and_then(Value::as_str));
    let nested = || {
        json.get("detail")
            .and_then(|d| d.get("error_code").or_else(|| d.get("code")))
            .and_then(Value::as_str)
    };
    direct.or_else(nested).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_extraction() {
        let err = ReportsError::from_response(400, r#"{"detail":"Invalid date range"}"#, None);
        assert_eq!(
            err,
            ReportsError::Http {
                status: 400,
                message: "Invalid date range".into()
            }
        );
        assert_eq!(err.user_message(), "Invalid date range");

        let err = ReportsError::from_response(500, r#"{"error":"boom"}"#, None);
        assert_eq!(err.user_message(), "boom");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_empty_body_falls_back_to_generic() {
        let err = ReportsError::from_response(502, "", None);
        assert_eq!(err.user_message(), format!("{} (HTTP 502)", GENERIC_MESSAGE));
    }

    #[test]
    fn test_plain_text_body_is_message() {
        let err = ReportsError::from_response(404, "Not Found\n", None);
        assert_eq!(err.user_message(), "Not Found");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_sheets_auth_errors() {
        let err = ReportsError::from_response(401, r#"{"detail":"token expired"}"#, Some("Google"));
        assert!(err.is_integration_auth());

        let err = ReportsError::from_response(
            400,
            r#"{"detail":{"error_code":"google_not_connected","message":"Connect Google"}}"#,
            Some("Google"),
        );
        assert_eq!(
            err,
            ReportsError::IntegrationNotConnected {
                provider: "Google".into(),
                message: "Connect Google".into()
            }
        );

        let err = ReportsError::from_response(500, r#"{"detail":"quota"}"#, Some("Google"));
        assert!(!err.is_integration_auth());
    }

    #[test]
    fn test_code_detected_without_provider() {
        let err = ReportsError::from_response(
            400,
            r#"{"code":"integration_not_connected","message":"no"}"#,
            None,
        );
        assert!(err.is_integration_auth());

        // 401 on a plain report endpoint is an ordinary HTTP error
        let err = ReportsError::from_response(401, "{}", None);
        assert!(!err.is_integration_auth());
    }

    #[test]
    fn test_timeout_is_retryable() {
        let err = ReportsError::Timeout { after_ms: 30_000 };
        assert!(err.is_retryable());
        assert!(!ReportsError::Cancelled.is_retryable());
        assert!(ReportsError::Cancelled.is_cancelled());
    }

    #[test]
    fn test_invalid_range_is_shown_verbatim() {
        let err = ReportsError::InvalidDateRange("Start date must not be after end date".into());
        assert_eq!(err.user_message(), "Start date must not be after end date");
        assert!(!err.is_retryable());
    }
}

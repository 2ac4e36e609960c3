//! Robot client errors

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when interacting with the Robot web service
#[derive(Debug, Error)]
pub enum RobotError {
    /// HTTP request/response error (connection, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials were refused
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service understood the request and refused it (invalid input, policy)
    #[error("Robot API rejected request ({status} {code}): {message}")]
    Rejected {
        status: u16,
        code: String,
        message: String,
    },

    /// Rate limiting or a server-side failure; the same request may succeed later
    #[error("Robot API unavailable ({status}): {message}")]
    Unavailable { status: u16, message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RobotError {
    /// Whether retrying the identical request could succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RobotError::Http(_) | RobotError::Authentication(_) | RobotError::Unavailable { .. }
        )
    }

    /// Classify a non-success response.
    ///
    /// The Robot service reports failures as `{"error": {"status", "code", "message"}}`.
    /// When the body is not in that shape the HTTP status alone decides.
    pub fn from_response(context: &str, status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);
        let code = detail
            .as_ref()
            .and_then(|d| d.code.clone())
            .unwrap_or_else(|| "UNKNOWN".to_string());
        let message = detail
            .as_ref()
            .and_then(|d| d.message.clone())
            .unwrap_or_else(|| body.trim().to_string());

        match (status, code.as_str()) {
            (404, _) | (_, "NOT_FOUND") | (_, "VSWITCH_NOT_FOUND") => {
                RobotError::NotFound(format!("{}: {}", context, message))
            }
            (401, _) => RobotError::Authentication(format!("{}: {}", context, message)),
            (_, "RATE_LIMIT_EXCEEDED") | (429, _) => RobotError::Unavailable { status, message },
            (s, _) if s >= 500 => RobotError::Unavailable { status, message },
            _ => RobotError::Rejected {
                status,
                code,
                message,
            },
        }
    }
}

/// Error body returned by the Robot web service
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[allow(dead_code)]
    status: Option<u16>,
    code: Option<String>,
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_from_status() {
        let err = RobotError::from_response("GET /vswitch/999", 404, r#"{"error":{"status":404,"code":"NOT_FOUND","message":"vSwitch not found"}}"#);
        assert!(matches!(err, RobotError::NotFound(ref m) if m.contains("vSwitch not found")));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_vlan_conflict_is_rejected() {
        let err = RobotError::from_response(
            "POST /vswitch",
            409,
            r#"{"error":{"status":409,"code":"VSWITCH_VLAN_NOT_UNIQUE","message":"VLAN already in use"}}"#,
        );
        match err {
            RobotError::Rejected { status, code, message } => {
                assert_eq!(status, 409);
                assert_eq!(code, "VSWITCH_VLAN_NOT_UNIQUE");
                assert_eq!(message, "VLAN already in use");
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_limit_is_transient() {
        let err = RobotError::from_response(
            "GET /vswitch/1",
            403,
            r#"{"error":{"status":403,"code":"RATE_LIMIT_EXCEEDED","message":"Rate limit exceeded"}}"#,
        );
        assert!(matches!(err, RobotError::Unavailable { status: 403, .. }));
        assert!(err.is_transient());
    }

    #[test]
    fn test_plain_body_falls_back_to_status() {
        let err = RobotError::from_response("GET /vswitch/1", 502, "Bad Gateway\n");
        match err {
            RobotError::Unavailable { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("Expected Unavailable, got {:?}", other),
        }

        let err = RobotError::from_response("GET /vswitch", 401, "Unauthorized");
        assert!(matches!(err, RobotError::Authentication(_)));
        assert!(err.is_transient());
    }
}

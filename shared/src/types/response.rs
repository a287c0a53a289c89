//! API response envelope

use serde::{Deserialize, Serialize};

/// Flat response body returned by every OTP endpoint
///
/// Both success and failure carry a boolean flag and a human-readable
/// message; error kinds are not serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Whether the request was successful
    pub success: bool,

    /// Human-readable outcome
    pub message: String,
}

impl ApiResponse {
    /// Create a successful response
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let body = serde_json::to_value(ApiResponse::success("OTP verified successfully")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": true, "message": "OTP verified successfully" })
        );

        let body = serde_json::to_value(ApiResponse::error("Invalid OTP")).unwrap();
        assert_eq!(body["success"], false);
    }
}

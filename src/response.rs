//! Uniform JSON envelope shared by every endpoint.

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize = Value> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }

    /// Success without a message, as login returns it.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            data: json!({}),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: json!({}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_shape() {
        let body = serde_json::to_value(ApiResponse::failure("nope")).unwrap();
        assert_eq!(body, json!({ "success": false, "message": "nope", "data": {} }));
    }

    #[test]
    fn test_ok_omits_message() {
        let body = serde_json::to_value(ApiResponse::ok()).unwrap();
        assert_eq!(body, json!({ "success": true, "data": {} }));
    }
}

//! Error envelope shared by every failing response.

use serde::{Deserialize, Serialize};

/// Error body: HTTP status, stable kind, human message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The HTTP status code.
    pub status: u16,

    /// Machine-checkable error category, e.g. `not_found`.
    pub kind: String,

    /// A human-readable explanation specific to this occurrence.
    pub message: String,

    /// Request ID for debugging purposes.
    #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            kind: kind.into(),
            message: message.into(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn internal_error() -> Self {
        Self::new(500, "internal_error", "An internal error occurred")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_is_omitted_when_absent() {
        let json =
            serde_json::to_value(ErrorResponse::new(400, "validation_error", "nope")).unwrap();
        assert_eq!(json["status"], 400);
        assert_eq!(json["kind"], "validation_error");
        assert!(json.get("requestId").is_none());

        let json =
            serde_json::to_value(ErrorResponse::internal_error().with_request_id("r-1")).unwrap();
        assert_eq!(json["requestId"], "r-1");
    }
}

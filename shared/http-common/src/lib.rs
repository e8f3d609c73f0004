//! Shared HTTP utilities for the catalog API workspace.
//!
//! Provides the common JSON error-body builders used by the api-server so
//! every endpoint reports failures in the same shape.

// ============================================================================
// JSON Response Helpers (framework-agnostic)
// ============================================================================

/// Create a structured error JSON with a default message based on the code.
///
/// Returns: `{"error": {"code": "<code>", "message": "<default message>"}}`
pub fn json_err(code: &str) -> serde_json::Value {
    let message = match code {
        "not_found" => "Resource not found",
        "invalid_request" => "Bad request",
        "conflict" => "Resource already exists",
        "error" | "internal" => "Internal server error",
        _ => code, // Fallback to code as message for unknown codes
    };
    serde_json::json!({"error": {"code": code, "message": message}})
}

/// Create a structured error JSON with a custom message.
///
/// Returns: `{"error": {"code": "<code>", "message": "<message>"}}`
pub fn json_error_with_message(code: &str, message: &str) -> serde_json::Value {
    serde_json::json!({"error": {"code": code, "message": message}})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_err() {
        let err = json_err("not_found");
        assert_eq!(
            err,
            serde_json::json!({"error": {"code": "not_found", "message": "Resource not found"}})
        );

        // Unknown code falls back to code as message
        let err = json_err("custom_error");
        assert_eq!(
            err,
            serde_json::json!({"error": {"code": "custom_error", "message": "custom_error"}})
        );
    }

    #[test]
    fn test_json_error_with_message() {
        let err = json_error_with_message("invalid_request", "title is required");
        assert_eq!(
            err,
            serde_json::json!({"error": {"code": "invalid_request", "message": "title is required"}})
        );
    }
}

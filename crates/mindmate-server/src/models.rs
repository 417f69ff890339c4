//! API request and response models.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Largest accepted message body, in bytes.
pub const MAX_MESSAGE_BYTES: usize = 16 * 1024;

/// Request body for POST /api/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
    /// Optional caller-supplied user id, echoed back.
    pub user_id: Option<String>,
    /// Optional caller-supplied session id, echoed back.
    pub session_id: Option<String>,
}

/// Request body for POST /api/classify.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub message: String,
}

/// Response body for GET /api/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Name of the active generator backend.
    pub generator: String,
    /// Version of the classifier keyword table.
    pub keyword_table_version: u32,
}

/// Rejects messages over [`MAX_MESSAGE_BYTES`].
pub fn check_message_size(message: &str) -> Result<()> {
    if message.len() > MAX_MESSAGE_BYTES {
        return Err(ApiError::BadRequest(format!(
            "message is {} bytes, limit is {}",
            message.len(),
            MAX_MESSAGE_BYTES
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_limit_is_inclusive() {
        assert!(check_message_size(&"a".repeat(MAX_MESSAGE_BYTES)).is_ok());
        assert!(matches!(
            check_message_size(&"a".repeat(MAX_MESSAGE_BYTES + 1)),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn oversized_message_maps_to_400() {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let err = check_message_size(&"a".repeat(MAX_MESSAGE_BYTES + 1)).unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn chat_request_ids_are_optional() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(req.message, "hi");
        assert!(req.user_id.is_none());
        assert!(req.session_id.is_none());
    }
}

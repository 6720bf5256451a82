//! Success envelope shared by all resource endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stock response messages reused across resources.
pub mod messages {
    pub const SUCCESS: &str = "Success";
    pub const CREATED: &str = "Created successfully";
    pub const UPDATED: &str = "Updated successfully";
    pub const DELETED: &str = "Deleted successfully";
}

/// Standard success payload: `{success: true, message, data}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope with no data slot (e.g. after a delete).
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_wraps_data() {
        let response = ApiResponse::ok(messages::CREATED, 42);
        assert!(response.success);
        assert_eq!(response.message, "Created successfully");
        assert_eq!(response.data, Some(42));
    }

    #[test]
    fn test_message_only_omits_data_field() {
        let response = ApiResponse::message(messages::DELETED);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], serde_json::json!(true));
        assert!(json.get("data").is_none());
    }
}

use core::fmt;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope shared by every endpoint: `{success, message?, ...payload}`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

impl<T: Serialize> fmt::Display for ApiResponse<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{json}"),
            Err(e) => write!(f, "Error serializing ApiResponse to JSON: {e}"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct EmptyBody {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Payload {
        #[serde(rename = "productId")]
        product_id: String,
    }

    #[test]
    fn payload_is_flattened_next_to_success() {
        let response = ApiResponse::with_message(
            "Item removed from cart",
            Payload {
                product_id: "3".into(),
            },
        );

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"success": true, "message": "Item removed from cart", "productId": "3"})
        );
    }

    #[test]
    fn message_is_omitted_when_absent() {
        let value = serde_json::to_value(ApiResponse::ok(EmptyBody::default())).unwrap();
        assert_eq!(value, json!({"success": true}));
    }
}

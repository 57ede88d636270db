use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    #[serde(default)]
    pub name: String,

    #[validate(length(min = 1, max = 254, message = "email is required"))]
    #[serde(default)]
    pub email: String,

    #[validate(length(max = 200))]
    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub message: String,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150, message = "name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 254, message = "email is required"))]
    pub email: String,

    /// Length is checked after trimming, in the service.
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct CreateUserRecord {
    pub name: String,
    pub email: String,
    pub password: String,
}

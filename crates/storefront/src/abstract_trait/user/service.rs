use crate::domain::{
    requests::auth::{LoginRequest, RegisterRequest},
    response::{
        api::{ApiResponse, EmptyBody},
        session::Session,
        user::{LoginResponse, UserEnvelope},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthServiceTrait {
    async fn register(&self, req: &RegisterRequest)
    -> Result<ApiResponse<UserEnvelope>, ServiceError>;
    /// Issues a fresh session bound to the account; `current` is retired.
    async fn login(
        &self,
        current: Option<&str>,
        req: &LoginRequest,
    ) -> Result<ApiResponse<LoginResponse>, ServiceError>;
    async fn logout(&self, session_id: Option<&str>) -> Result<ApiResponse<EmptyBody>, ServiceError>;
    async fn profile(&self, session: &Session) -> Result<ApiResponse<UserEnvelope>, ServiceError>;
}

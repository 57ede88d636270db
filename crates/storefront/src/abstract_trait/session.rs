use crate::domain::response::session::Session;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynSessionStore = Arc<dyn SessionStoreTrait + Send + Sync>;

#[async_trait]
pub trait SessionStoreTrait {
    async fn create_session(&self, user_id: Option<i64>) -> Result<Session, ServiceError>;
    /// Looks the session up and slides its expiry forward.
    async fn get_session(&self, session_id: &str) -> Result<Option<Session>, ServiceError>;
    async fn save_session(&self, session: &Session) -> Result<(), ServiceError>;
    async fn delete_session(&self, session_id: &str) -> Result<(), ServiceError>;
}

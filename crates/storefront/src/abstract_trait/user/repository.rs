use crate::{domain::requests::auth::CreateUserRecord, model::user::User as UserModel};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynUserRepository = Arc<dyn UserRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserRepositoryTrait {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError>;
    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserModel>, RepositoryError>;
    async fn create_user(&self, record: &CreateUserRecord) -> Result<UserModel, RepositoryError>;
}

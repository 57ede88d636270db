use crate::{domain::requests::contact::ContactRequest, model::contact_message::ContactMessage};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynContactRepository = Arc<dyn ContactRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ContactRepositoryTrait {
    async fn create_message(&self, req: &ContactRequest)
    -> Result<ContactMessage, RepositoryError>;
}

use crate::model::cart_item::CartItemWithProduct;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynCartQueryRepository = Arc<dyn CartQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CartQueryRepositoryTrait {
    async fn find_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<CartItemWithProduct>, RepositoryError>;
}

use crate::model::order::Order as OrderModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_by_session(&self, session_id: &str) -> Result<Vec<OrderModel>, RepositoryError>;
    async fn find_by_order_id(
        &self,
        session_id: &str,
        order_id: &str,
    ) -> Result<Option<OrderModel>, RepositoryError>;
}

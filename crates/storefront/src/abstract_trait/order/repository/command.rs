use crate::{domain::requests::order::CreateOrderRecord, model::order::Order as OrderModel};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Persists the order and empties the session's cart. Either both happen or neither.
    async fn record_checkout(
        &self,
        record: &CreateOrderRecord,
    ) -> Result<OrderModel, RepositoryError>;
}

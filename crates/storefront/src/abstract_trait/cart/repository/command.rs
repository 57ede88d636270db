use crate::model::cart_item::CartItem;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynCartCommandRepository = Arc<dyn CartCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CartCommandRepositoryTrait {
    /// Creates the (session, product) line or increments it, as one statement.
    async fn add_quantity(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError>;

    /// Overwrites the quantity of an existing line. `None` when the line is absent.
    async fn set_quantity(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError>;

    /// Returns whether a line was deleted.
    async fn remove_item(&self, session_id: &str, product_id: &str)
    -> Result<bool, RepositoryError>;

    /// Moves every line of `from` onto `to`, which must have no lines yet.
    async fn transfer_cart(&self, from: &str, to: &str) -> Result<u64, RepositoryError>;
}

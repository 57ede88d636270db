use crate::domain::{
    requests::cart::{AddToCartRequest, RemoveFromCartRequest, UpdateCartRequest},
    response::{
        api::ApiResponse,
        cart::{CartMutationResponse, CartRemovalResponse, CartResponse},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynCartService = Arc<dyn CartServiceTrait + Send + Sync>;

#[async_trait]
pub trait CartServiceTrait {
    async fn get_cart(&self, session_id: &str) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn add_to_cart(
        &self,
        session_id: &str,
        req: &AddToCartRequest,
    ) -> Result<ApiResponse<CartMutationResponse>, ServiceError>;
    async fn update_cart(
        &self,
        session_id: &str,
        req: &UpdateCartRequest,
    ) -> Result<ApiResponse<CartMutationResponse>, ServiceError>;
    async fn remove_from_cart(
        &self,
        session_id: &str,
        req: &RemoveFromCartRequest,
    ) -> Result<ApiResponse<CartRemovalResponse>, ServiceError>;
}

use crate::domain::{
    requests::order::CheckoutRequest,
    response::{
        api::ApiResponse,
        order::{CheckoutResponse, OrderEnvelope, OrdersResponse},
        session::Session,
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderService = Arc<dyn OrderServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderServiceTrait {
    async fn checkout(
        &self,
        session: Option<&Session>,
        req: &CheckoutRequest,
    ) -> Result<ApiResponse<CheckoutResponse>, ServiceError>;
    async fn list_orders(&self, session_id: &str)
    -> Result<ApiResponse<OrdersResponse>, ServiceError>;
    async fn get_order(
        &self,
        session_id: &str,
        order_id: &str,
    ) -> Result<ApiResponse<OrderEnvelope>, ServiceError>;
}

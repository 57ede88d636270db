use crate::domain::{
    requests::contact::ContactRequest,
    response::{
        api::{ApiResponse, EmptyBody},
        contact::ContactEnvelope,
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynContactService = Arc<dyn ContactServiceTrait + Send + Sync>;

#[async_trait]
pub trait ContactServiceTrait {
    fn contact_info(&self) -> ApiResponse<EmptyBody>;
    async fn submit(&self, req: &ContactRequest)
    -> Result<ApiResponse<ContactEnvelope>, ServiceError>;
}

use crate::{
    abstract_trait::contact::{ContactServiceTrait, DynContactRepository},
    domain::{
        requests::contact::ContactRequest,
        response::{
            api::{ApiResponse, EmptyBody},
            contact::{ContactData, ContactEnvelope},
        },
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, ServiceTracing},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

#[derive(Clone)]
pub struct ContactService {
    repository: DynContactRepository,
    tracing: ServiceTracing,
}

impl ContactService {
    pub async fn new(repository: DynContactRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let tracing =
            super::register_service_tracing("contact-service", "contact_service", &registry).await;

        Self {
            repository,
            tracing,
        }
    }
}

#[async_trait]
impl ContactServiceTrait for ContactService {
    fn contact_info(&self) -> ApiResponse<EmptyBody> {
        ApiResponse::with_message("Contact us at contact@example.com", EmptyBody::default())
    }

    async fn submit(
        &self,
        req: &ContactRequest,
    ) -> Result<ApiResponse<ContactEnvelope>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracing.start_tracing(
            "contact_submit",
            vec![
                KeyValue::new("component", "contact"),
                KeyValue::new("operation", "submit"),
            ],
        );

        let cleaned = ContactRequest {
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            subject: req.subject.trim().to_string(),
            message: req.message.clone(),
        };

        if cleaned.name.is_empty() || cleaned.email.is_empty() {
            self.tracing
                .complete_tracing_error(&tracing_ctx, method, "Missing name or email")
                .await;
            return Err(ServiceError::validation("name and email are required"));
        }

        match self.repository.create_message(&cleaned).await {
            Ok(message) => {
                info!("✅ Contact message {} stored", message.id);
                self.tracing
                    .complete_tracing_success(&tracing_ctx, method, "Contact message stored")
                    .await;
                Ok(ApiResponse::with_message(
                    "Contact form submitted successfully!",
                    ContactEnvelope {
                        data: ContactData::from(message),
                    },
                ))
            }
            Err(e) => {
                let msg = format!("❌ Failed to store contact message: {e:?}");
                error!("{msg}");
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &msg)
                    .await;
                Err(ServiceError::Repo(e))
            }
        }
    }
}

use crate::{
    abstract_trait::contact::ContactRepositoryTrait, domain::requests::contact::ContactRequest,
    model::contact_message::ContactMessage,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ContactRepository {
    db: ConnectionPool,
}

impl ContactRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContactRepositoryTrait for ContactRepository {
    async fn create_message(
        &self,
        req: &ContactRequest,
    ) -> Result<ContactMessage, RepositoryError> {
        info!("✉️ Storing contact message from {}", req.email);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let message = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, subject, message, created_at)
            VALUES ($1, $2, $3, $4, CURRENT_TIMESTAMP)
            RETURNING id, name, email, subject, message, is_read, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.subject)
        .bind(&req.message)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to store contact message: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(message)
    }
}

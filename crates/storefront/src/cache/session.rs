use crate::{abstract_trait::session::SessionStoreTrait, domain::response::session::Session};
use async_trait::async_trait;
use chrono::Duration;
use deadpool_redis::{Connection, Pool, redis::AsyncCommands};
use shared::{errors::ServiceError, utils::generate_random_string};
use std::sync::Arc;
use tracing::{debug, error};

const SESSION_TOKEN_LENGTH: usize = 48;

/// Redis-backed session store. Entries live under `session:{token}` with a sliding TTL.
#[derive(Clone)]
pub struct SessionStore {
    pool: Arc<Pool>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(pool: Pool, ttl: Duration) -> Self {
        Self {
            pool: Arc::new(pool),
            ttl,
        }
    }

    fn key(session_id: &str) -> String {
        format!("session:{session_id}")
    }

    async fn get_conn(&self) -> Result<Connection, ServiceError> {
        self.pool.get().await.map_err(|e| {
            error!("Failed to get Redis connection from pool: {:?}", e);
            ServiceError::Internal(format!("session store unavailable: {e}"))
        })
    }

    async fn write(&self, session: &Session) -> Result<(), ServiceError> {
        let json_data = serde_json::to_string(session).map_err(|e| {
            error!("Failed to serialize session: {:?}", e);
            ServiceError::Internal(format!("failed to serialize session: {e}"))
        })?;

        let mut conn = self.get_conn().await?;

        let _: () = conn
            .set_ex(
                Self::key(&session.session_id),
                json_data,
                self.ttl.num_seconds() as u64,
            )
            .await
            .map_err(|e| {
                error!("Failed to write session: {:?}", e);
                ServiceError::Internal(format!("failed to write session: {e}"))
            })?;

        Ok(())
    }
}

#[async_trait]
impl SessionStoreTrait for SessionStore {
    async fn create_session(&self, user_id: Option<i64>) -> Result<Session, ServiceError> {
        let token = generate_random_string(SESSION_TOKEN_LENGTH)
            .map_err(|e| ServiceError::Internal(format!("failed to generate session id: {e}")))?;

        let mut session = Session::new(token);
        session.user_id = user_id;

        self.write(&session).await?;

        debug!("Session created");

        Ok(session)
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<Session>, ServiceError> {
        let key = Self::key(session_id);
        let mut conn = self.get_conn().await?;

        let data: Option<String> = conn.get(&key).await.map_err(|e| {
            error!("Redis get error for session: {:?}", e);
            ServiceError::Internal(format!("failed to read session: {e}"))
        })?;

        let Some(data) = data else {
            debug!("Session not found");
            return Ok(None);
        };

        let session = match serde_json::from_str::<Session>(&data) {
            Ok(session) => session,
            Err(e) => {
                error!("Failed to deserialize session: {:?}", e);
                return Ok(None);
            }
        };

        let _: bool = conn.expire(&key, self.ttl.num_seconds()).await.map_err(|e| {
            error!("Failed to refresh session TTL: {:?}", e);
            ServiceError::Internal(format!("failed to refresh session: {e}"))
        })?;

        Ok(Some(session))
    }

    async fn save_session(&self, session: &Session) -> Result<(), ServiceError> {
        self.write(session).await
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), ServiceError> {
        let mut conn = self.get_conn().await?;

        let _: () = conn.del(Self::key(session_id)).await.map_err(|e| {
            error!("Failed to delete session: {:?}", e);
            ServiceError::Internal(format!("failed to delete session: {e}"))
        })?;

        debug!("Session deleted");

        Ok(())
    }
}

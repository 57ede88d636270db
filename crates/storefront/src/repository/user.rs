use crate::{
    abstract_trait::user::UserRepositoryTrait, domain::requests::auth::CreateUserRecord,
    model::user::User as UserModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct UserRepository {
    db: ConnectionPool,
}

impl UserRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT user_id, name, email, password, created_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch user by email: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT user_id, name, email, password, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch user {user_id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(user)
    }

    async fn create_user(&self, record: &CreateUserRecord) -> Result<UserModel, RepositoryError> {
        info!("👤 Creating user {}", record.email);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (name, email, password, created_at)
            VALUES ($1, $2, $3, CURRENT_TIMESTAMP)
            RETURNING user_id, name, email, password, created_at
            "#,
        )
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.password)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to create user: {:?}", e);
            RepositoryError::from_constraint(e)
        })?;

        Ok(user)
    }
}

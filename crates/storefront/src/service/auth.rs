use crate::{
    abstract_trait::{
        cart::DynCartCommandRepository,
        session::DynSessionStore,
        user::{AuthServiceTrait, DynUserRepository},
    },
    domain::{
        requests::auth::{CreateUserRecord, LoginRequest, RegisterRequest},
        response::{
            api::{ApiResponse, EmptyBody},
            session::Session,
            user::{LoginResponse, UserData, UserEnvelope},
        },
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynHashing,
    errors::{RepositoryError, ServiceError},
    utils::{Method, ServiceTracing},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use validator::ValidateEmail;

const DUPLICATE_EMAIL: &str = "User with this email already exists";

#[derive(Clone)]
pub struct AuthService {
    users: DynUserRepository,
    sessions: DynSessionStore,
    carts: DynCartCommandRepository,
    hashing: DynHashing,
    tracing: ServiceTracing,
}

impl AuthService {
    pub async fn new(
        users: DynUserRepository,
        sessions: DynSessionStore,
        carts: DynCartCommandRepository,
        hashing: DynHashing,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let tracing =
            super::register_service_tracing("auth-service", "auth_service", &registry).await;

        Self {
            users,
            sessions,
            carts,
            hashing,
            tracing,
        }
    }

    async fn register_inner(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserEnvelope>, ServiceError> {
        let name = req.name.trim();
        let email = req.email.trim();
        let password = req.password.trim();

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ServiceError::validation("All fields are required"));
        }
        if !email.validate_email() {
            return Err(ServiceError::validation("Invalid email format"));
        }
        if password.chars().count() < 6 {
            return Err(ServiceError::validation(
                "Password must be at least 6 characters long",
            ));
        }

        if self.users.find_by_email(email).await?.is_some() {
            warn!("Registration rejected, email already in use");
            return Err(ServiceError::Conflict(DUPLICATE_EMAIL.into()));
        }

        let hashed = self.hashing.hash_password(password).await?;

        let user = self
            .users
            .create_user(&CreateUserRecord {
                name: name.to_string(),
                email: email.to_string(),
                password: hashed,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::AlreadyExists(_) => ServiceError::Conflict(DUPLICATE_EMAIL.into()),
                other => ServiceError::Repo(other),
            })?;

        info!("✅ User {} registered", user.user_id);

        Ok(ApiResponse::with_message(
            "User registered successfully",
            UserEnvelope {
                user: UserData::from(user),
            },
        ))
    }

    async fn login_inner(
        &self,
        current: Option<&str>,
        req: &LoginRequest,
    ) -> Result<ApiResponse<LoginResponse>, ServiceError> {
        let email = req.email.trim();
        let password = req.password.trim();

        if email.is_empty() || password.is_empty() {
            return Err(ServiceError::validation("Email and password are required"));
        }

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        self.hashing
            .compare_password(&user.password, password)
            .await?;

        let fresh = self.sessions.create_session(Some(user.user_id)).await?;

        if let Some(previous) = current {
            if self.sessions.get_session(previous).await?.is_some() {
                self.carts
                    .transfer_cart(previous, &fresh.session_id)
                    .await?;
                self.sessions.delete_session(previous).await?;
            }
        }

        info!("✅ User {} logged in", user.user_id);

        Ok(ApiResponse::with_message(
            "Login successful",
            LoginResponse {
                user: UserData::from(user),
                session_id: fresh.session_id,
            },
        ))
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserEnvelope>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracing.start_tracing(
            "auth_register",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("operation", "register"),
            ],
        );

        match self.register_inner(req).await {
            Ok(response) => {
                self.tracing
                    .complete_tracing_success(&tracing_ctx, method, "User registered")
                    .await;
                Ok(response)
            }
            Err(e) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string())
                    .await;
                Err(e)
            }
        }
    }

    async fn login(
        &self,
        current: Option<&str>,
        req: &LoginRequest,
    ) -> Result<ApiResponse<LoginResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracing.start_tracing(
            "auth_login",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("operation", "login"),
            ],
        );

        match self.login_inner(current, req).await {
            Ok(response) => {
                self.tracing
                    .complete_tracing_success(&tracing_ctx, method, "Login successful")
                    .await;
                Ok(response)
            }
            Err(e) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string())
                    .await;
                Err(e)
            }
        }
    }

    async fn logout(&self, session_id: Option<&str>) -> Result<ApiResponse<EmptyBody>, ServiceError> {
        if let Some(session_id) = session_id {
            self.sessions.delete_session(session_id).await?;
            info!("👋 Session ended");
        }

        Ok(ApiResponse::with_message(
            "Logout successful",
            EmptyBody::default(),
        ))
    }

    async fn profile(&self, session: &Session) -> Result<ApiResponse<UserEnvelope>, ServiceError> {
        let user_id = session
            .user_id
            .ok_or_else(|| ServiceError::Unauthorized("Not logged in".into()))?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Not logged in".into()))?;

        Ok(ApiResponse::ok(UserEnvelope {
            user: UserData::from(user),
        }))
    }
}

use crate::{
    abstract_trait::user::DynAuthService,
    domain::{
        requests::auth::{LoginRequest, RegisterRequest},
        response::{
            api::{ApiResponse, EmptyBody},
            session::Session,
            user::{LoginResponse, UserEnvelope},
        },
    },
    middleware::{
        session::{
            SESSION_COOKIE, SESSION_HEADER, require_session, session_cookie, session_token,
        },
        validate::SimpleValidatedJson,
    },
    state::AppState,
};
use axum::{
    Extension, Json,
    http::{HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered", body = ApiResponse<UserEnvelope>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Auth"
)]
pub async fn register_user_handler(
    Extension(service): Extension<DynAuthService>,
    SimpleValidatedJson(body): SimpleValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.register(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid email or password")
    ),
    tag = "Auth"
)]
pub async fn login_user_handler(
    Extension(service): Extension<DynAuthService>,
    jar: CookieJar,
    headers: HeaderMap,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let current = session_token(&jar, &headers);
    let response = service.login(current.as_deref(), &body).await?;

    let session_id = response.data.session_id.clone();
    let jar = jar.add(session_cookie(session_id.clone()));

    Ok((
        StatusCode::OK,
        jar,
        [(SESSION_HEADER, session_id)],
        Json(response),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logout successful", body = ApiResponse<EmptyBody>)
    ),
    tag = "Auth"
)]
pub async fn logout_user_handler(
    Extension(service): Extension<DynAuthService>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HttpError> {
    let token = session_token(&jar, &headers);
    let response = service.logout(token.as_deref()).await?;

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));

    Ok((StatusCode::OK, jar, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Account bound to the current session", body = ApiResponse<UserEnvelope>),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "Session not found")
    ),
    security(("session_cookie" = [])),
    tag = "Auth"
)]
pub async fn get_profile_handler(
    Extension(service): Extension<DynAuthService>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.profile(&session).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route("/api/auth/register", post(register_user_handler))
        .route("/api/auth/login", post(login_user_handler))
        .route("/api/auth/logout", post(logout_user_handler));

    let private_routes = OpenApiRouter::new()
        .route("/api/profile", get(get_profile_handler))
        .route_layer(middleware::from_fn(require_session));

    public_routes
        .merge(private_routes)
        .layer(Extension(app_state.di_container.auth_service.clone()))
        .layer(Extension(app_state.di_container.session_store.clone()))
}

use crate::domain::response::api::{ApiResponse, EmptyBody};
use axum::{Json, http::StatusCode, response::IntoResponse, routing::get};
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/home",
    tag = "Home",
    responses(
        (status = 200, description = "Welcome message", body = ApiResponse<EmptyBody>)
    )
)]
pub async fn home_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::with_message(
            "Welcome to Home!",
            EmptyBody::default(),
        )),
    )
}

pub fn home_routes() -> OpenApiRouter {
    OpenApiRouter::new().route("/api/home", get(home_handler))
}

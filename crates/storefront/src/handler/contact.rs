use crate::{
    abstract_trait::contact::DynContactService,
    domain::{
        requests::contact::ContactRequest,
        response::{
            api::{ApiResponse, EmptyBody},
            contact::ContactEnvelope,
        },
    },
    middleware::validate::SimpleValidatedJson,
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/contact",
    tag = "Contact",
    responses(
        (status = 200, description = "Contact information", body = ApiResponse<EmptyBody>)
    )
)]
pub async fn get_contact_info(
    Extension(service): Extension<DynContactService>,
) -> impl IntoResponse {
    (StatusCode::OK, Json(service.contact_info()))
}

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Contact message stored", body = ApiResponse<ContactEnvelope>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn submit_contact(
    Extension(service): Extension<DynContactService>,
    SimpleValidatedJson(body): SimpleValidatedJson<ContactRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.submit(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn contact_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/contact", get(get_contact_info).post(submit_contact))
        .layer(Extension(app_state.di_container.contact_service.clone()))
}

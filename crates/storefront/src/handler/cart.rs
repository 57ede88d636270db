use crate::{
    abstract_trait::cart::DynCartService,
    domain::{
        requests::cart::{AddToCartRequest, RemoveFromCartRequest, UpdateCartRequest},
        response::{
            api::ApiResponse,
            cart::{CartMutationResponse, CartRemovalResponse, CartResponse},
            session::Session,
        },
    },
    middleware::{
        session::{issue_session, require_session},
        validate::SimpleValidatedJson,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    responses(
        (status = 200, description = "Cart lines with totals", body = ApiResponse<CartResponse>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_cart(
    Extension(service): Extension<DynCartService>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_cart(&session.session_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/cart/add",
    tag = "Cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Item added", body = ApiResponse<CartMutationResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_to_cart(
    Extension(service): Extension<DynCartService>,
    Extension(session): Extension<Session>,
    SimpleValidatedJson(body): SimpleValidatedJson<AddToCartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add_to_cart(&session.session_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/cart/update",
    tag = "Cart",
    security(("session_cookie" = [])),
    request_body = UpdateCartRequest,
    responses(
        (status = 200, description = "Quantity set", body = ApiResponse<CartMutationResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Session or cart line not found")
    )
)]
pub async fn update_cart(
    Extension(service): Extension<DynCartService>,
    Extension(session): Extension<Session>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateCartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_cart(&session.session_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/cart/remove",
    tag = "Cart",
    security(("session_cookie" = [])),
    request_body = RemoveFromCartRequest,
    responses(
        (status = 200, description = "Item removed", body = ApiResponse<CartRemovalResponse>),
        (status = 404, description = "Session or cart line not found")
    )
)]
pub async fn remove_from_cart(
    Extension(service): Extension<DynCartService>,
    Extension(session): Extension<Session>,
    SimpleValidatedJson(body): SimpleValidatedJson<RemoveFromCartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.remove_from_cart(&session.session_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let issuing_routes = OpenApiRouter::new()
        .route("/api/cart", get(get_cart))
        .route("/api/cart/add", post(add_to_cart))
        .route_layer(middleware::from_fn(issue_session));

    let session_routes = OpenApiRouter::new()
        .route("/api/cart/update", put(update_cart))
        .route("/api/cart/remove", delete(remove_from_cart))
        .route_layer(middleware::from_fn(require_session));

    issuing_routes
        .merge(session_routes)
        .layer(Extension(app_state.di_container.cart_service.clone()))
        .layer(Extension(app_state.di_container.session_store.clone()))
}

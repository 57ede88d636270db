use crate::{
    abstract_trait::order::DynOrderService,
    domain::{
        requests::order::CheckoutRequest,
        response::{
            api::ApiResponse,
            order::{CheckoutResponse, OrderEnvelope, OrdersResponse},
            session::Session,
        },
    },
    middleware::{session::require_session, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/buy",
    tag = "Order",
    security(("session_cookie" = [])),
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order recorded and cart cleared", body = ApiResponse<CheckoutResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Session not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn buy_handler(
    Extension(service): Extension<DynOrderService>,
    Extension(session): Extension<Session>,
    SimpleValidatedJson(body): SimpleValidatedJson<CheckoutRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.checkout(Some(&session), &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Order",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Orders of the current session, newest first", body = ApiResponse<OrdersResponse>),
        (status = 404, description = "Session not found")
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderService>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_orders(&session.session_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{orderId}",
    tag = "Order",
    security(("session_cookie" = [])),
    params(("orderId" = String, Path, description = "Order reference")),
    responses(
        (status = 200, description = "Order details", body = ApiResponse<OrderEnvelope>),
        (status = 404, description = "Session or order not found")
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderService>,
    Extension(session): Extension<Session>,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_order(&session.session_id, &order_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/buy", post(buy_handler))
        .route("/api/orders", get(get_orders))
        .route("/api/orders/{orderId}", get(get_order))
        .route_layer(middleware::from_fn(require_session))
        .layer(Extension(app_state.di_container.order_service.clone()))
        .layer(Extension(app_state.di_container.session_store.clone()))
}

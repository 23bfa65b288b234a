//! Orders service HTTP layer
//!
//! - `POST /orders` `{"title": "..."}` → `201 {"id": n}`
//! - `GET /orders/{id}` → `200 {"id": n, "title": "..."}` or `404 not found`

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Span, error, info};

use super::engine::OrderEngine;
use super::error::{CreateOrderError, StoreError};
use super::types::{Order, OrderId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub id: OrderId,
}

/// Body returned when the order was stored but could not be announced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialFailureResponse {
    pub id: OrderId,
    pub error: String,
}

/// Handler-level error mapping for the orders routes
#[derive(Debug)]
pub enum OrdersApiError {
    Create(CreateOrderError),
    Get(StoreError),
}

impl IntoResponse for OrdersApiError {
    fn into_response(self) -> Response {
        match self {
            OrdersApiError::Create(CreateOrderError::Publish { id, source }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PartialFailureResponse {
                    id,
                    error: format!("order stored but not announced: {}", source),
                }),
            )
                .into_response(),
            OrdersApiError::Create(CreateOrderError::Persist(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            OrdersApiError::Get(StoreError::NotFound) => {
                (StatusCode::NOT_FOUND, "not found").into_response()
            }
            OrdersApiError::Get(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Build the orders service router
pub fn router(engine: Arc<OrderEngine>) -> Router {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/{id}", get(get_order))
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

/// Serve the orders API until a shutdown signal arrives
pub async fn run_server(
    listener: TcpListener,
    engine: Arc<OrderEngine>,
    span: Span,
) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    span.in_scope(|| info!(addr = %addr, "Starting orders service"));
    axum::serve(listener, router(engine))
        .with_graceful_shutdown(crate::shutdown_signal())
        .await?;
    span.in_scope(|| info!("Orders service closed"));
    Ok(())
}

/// POST /orders
pub async fn create_order(
    State(engine): State<Arc<OrderEngine>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), OrdersApiError> {
    let id = engine
        .create_order(&req.title)
        .await
        .map_err(OrdersApiError::Create)?;
    Ok((StatusCode::CREATED, Json(CreateOrderResponse { id })))
}

/// GET /orders/{id}
pub async fn get_order(
    State(engine): State<Arc<OrderEngine>>,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>, OrdersApiError> {
    match engine.get_order(id).await {
        Ok(order) => Ok(Json(order)),
        Err(e) => {
            if !e.is_not_found() {
                error!(id = id, error = %e, "Failed to load order");
            }
            Err(OrdersApiError::Get(e))
        }
    }
}

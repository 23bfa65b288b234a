//! API Gateway
//!
//! Terminates client HTTP traffic for the `orders` resource and relays it
//! to the orders backend. Route registration and server setup live here;
//! the forwarding itself is in [`proxy`].

pub mod error;
pub mod proxy;
pub mod state;

use axum::{Router, routing::any};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::RequestBodyTimeoutLayer, trace::TraceLayer};
use tracing::{Span, info};

pub use error::ProxyError;
pub use state::{GatewayState, ServerConfig};

/// Routes of the gateway: `/orders` and everything below `/orders/`.
/// Unmatched paths get 404 from the router.
pub fn router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/orders", any(proxy::handle_orders))
        .route("/orders/", any(proxy::handle_orders))
        .route("/orders/{*rest}", any(proxy::handle_orders))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start HTTP Gateway server, returning once a shutdown signal arrives
pub async fn run_server(
    listener: TcpListener,
    orders: ServerConfig,
    read_timeout: Duration,
    span: Span,
) -> std::io::Result<()> {
    let state = Arc::new(GatewayState::new(orders, span.clone()));
    let app = router(state).layer(RequestBodyTimeoutLayer::new(read_timeout));

    let addr = listener.local_addr()?;
    span.in_scope(|| info!(addr = %addr, "Starting gateway"));
    axum::serve(listener, app)
        .with_graceful_shutdown(crate::shutdown_signal())
        .await?;
    span.in_scope(|| info!("Gateway closed"));
    Ok(())
}

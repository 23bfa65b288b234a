//! order_mesh - Orders gateway and order engine
//!
//! Two independently testable services:
//!
//! ```text
//! Client ──▶ Gateway (/orders, /orders/*) ──▶ Orders API ──▶ OrderEngine ──▶ Database
//!                                                                       └──▶ MessagingSystem
//! ```
//!
//! # Modules
//!
//! - [`gateway`] - Verbatim forwarding of `orders` traffic to the backend
//! - [`orders`] - Create-then-publish workflow, ports and adapters
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod gateway;
pub mod logging;
pub mod orders;

// Convenient re-exports at crate root
pub use config::{AppConfig, ConfigError};
pub use gateway::{GatewayState, ProxyError, ServerConfig};
pub use orders::{
    CreateOrderError, Database, MessagingSystem, Order, OrderCreatedEvent, OrderEngine, OrderId,
    PublishError, StoreError,
};

/// Resolves on Ctrl+C. A failure to install the handler is treated as an
/// immediate shutdown request.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

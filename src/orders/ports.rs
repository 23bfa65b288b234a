//! Order Ports
//!
//! Capability contracts for the collaborators of the order engine.
//! Adapters live in [`super::adapters`]; the engine only sees these traits.

use async_trait::async_trait;

use super::error::{PublishError, StoreError};
use super::types::{Order, OrderCreatedEvent, OrderId};

/// Durable order storage
///
/// Uniqueness and monotonic allocation of ids are owned by the adapter.
#[async_trait]
pub trait Database: Send + Sync {
    /// Get adapter name for logging
    fn name(&self) -> &'static str;

    /// Store a new order and return its assigned id
    async fn create_order(&self, title: &str) -> Result<OrderId, StoreError>;

    /// Fetch an order, [`StoreError::NotFound`] when no row matches
    async fn get_order(&self, id: OrderId) -> Result<Order, StoreError>;
}

/// Order announcement channel
///
/// Invoked at most once per successfully persisted order. No retry and no
/// idempotency key is applied by the caller.
#[async_trait]
pub trait MessagingSystem: Send + Sync {
    /// Get adapter name for logging
    fn name(&self) -> &'static str;

    async fn publish_order_created(&self, event: &OrderCreatedEvent) -> Result<(), PublishError>;
}


#[cfg(test)]
pub use mock::{MockDatabase, MockMessaging};

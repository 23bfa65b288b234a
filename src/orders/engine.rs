//! Order Engine
//!
//! Drives the create-then-publish workflow for a new order.
//!
//! # Ordering
//!
//! 1. Persist through [`Database`]
//! 2. Announce through [`MessagingSystem`], only after step 1 succeeded
//!
//! There is no shared transaction between the two steps. A failed
//! announcement is reported to the caller while the order stays stored
//! (see [`CreateOrderError::Publish`]).

use std::sync::Arc;
use tracing::{Instrument, Span, debug, error, info, info_span};

use super::error::{CreateOrderError, StoreError};
use super::ports::{Database, MessagingSystem};
use super::types::{CreateOrderState, Order, OrderCreatedEvent, OrderId};

/// Order Engine - persists orders and announces their creation
pub struct OrderEngine {
    database: Arc<dyn Database>,
    messaging: Arc<dyn MessagingSystem>,
    /// Logging context for everything this engine does
    span: Span,
}

impl OrderEngine {
    pub fn new(
        database: Arc<dyn Database>,
        messaging: Arc<dyn MessagingSystem>,
        span: Span,
    ) -> Self {
        Self {
            database,
            messaging,
            span,
        }
    }

    /// Create an order and announce it.
    ///
    /// Returns the storage-assigned id. On [`CreateOrderError::Persist`] the
    /// messaging system was never called; on [`CreateOrderError::Publish`]
    /// the order exists under the carried id.
    pub async fn create_order(&self, title: &str) -> Result<OrderId, CreateOrderError> {
        let span = info_span!(parent: &self.span, "create_order", title = %title);
        self.run_create(title).instrument(span).await
    }

    /// Read back a stored order
    pub async fn get_order(&self, id: OrderId) -> Result<Order, StoreError> {
        let span = info_span!(parent: &self.span, "get_order", id = id);
        self.database.get_order(id).instrument(span).await
    }

    async fn run_create(&self, title: &str) -> Result<OrderId, CreateOrderError> {
        let state = transition(CreateOrderState::Idle, CreateOrderState::Persisting);

        let id = match self.database.create_order(title).await {
            Ok(id) => id,
            Err(e) => {
                transition(state, CreateOrderState::PersistFailed);
                error!(
                    database = self.database.name(),
                    error = %e,
                    "Failed to persist order"
                );
                return Err(CreateOrderError::Persist(e));
            }
        };

        let state = transition(state, CreateOrderState::Persisted);
        let state = transition(state, CreateOrderState::Publishing);

        let event = OrderCreatedEvent::new(id, title);
        if let Err(e) = self.messaging.publish_order_created(&event).await {
            transition(state, CreateOrderState::PublishFailed);
            error!(
                id = id,
                messaging = self.messaging.name(),
                error = %e,
                "Order persisted but announcement failed"
            );
            return Err(CreateOrderError::Publish { id, source: e });
        }

        transition(state, CreateOrderState::Published);
        info!(id = id, "Order created");
        Ok(id)
    }
}

fn transition(from: CreateOrderState, to: CreateOrderState) -> CreateOrderState {
    debug!(from = %from, to = %to, "create_order state");
    to
}

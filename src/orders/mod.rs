//! Orders Service
//!
//! Create-then-publish workflow for new orders.
//!
//! # Architecture
//!
//! ```text
//! HTTP (api) → OrderEngine → Database        (PgDatabase | InMemoryDatabase)
//!                          → MessagingSystem (WebhookMessaging | LogMessaging)
//! ```
//!
//! # Ordering Invariants
//!
//! 1. **Persist-Before-Publish**: the event is only built from a stored order
//! 2. **No Publish On Persist Failure**: the messaging port is never called
//! 3. **At Most Once**: one publish attempt per stored order, no retry
//! 4. **Publish Failure Is Surfaced**: the caller gets the error together
//!    with the id of the order that stays stored

pub mod adapters;
pub mod api;
pub mod engine;
pub mod error;
pub mod ports;
pub mod types;

// Re-exports for convenience
pub use engine::OrderEngine;
pub use error::{CreateOrderError, PublishError, StoreError};
pub use ports::{Database, MessagingSystem};
pub use types::{CreateOrderState, Order, OrderCreatedEvent, OrderId};

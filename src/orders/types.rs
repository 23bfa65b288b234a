//! Order domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned order identifier
pub type OrderId = i64;

/// A persisted order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub title: String,
}

impl Order {
    pub fn new(id: OrderId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Announcement of a successfully persisted order.
///
/// Same shape as [`Order`] at the moment of persistence.
pub type OrderCreatedEvent = Order;

/// Progress of a single `create_order` call
///
/// ```text
/// Idle → Persisting → PersistFailed
///                   → Persisted → Publishing → Published
///                                            → PublishFailed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreateOrderState {
    Idle,
    Persisting,
    /// Terminal: nothing stored, nothing published
    PersistFailed,
    Persisted,
    Publishing,
    /// Terminal: stored and announced
    Published,
    /// Terminal: stored but not announced
    PublishFailed,
}

impl CreateOrderState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CreateOrderState::PersistFailed
                | CreateOrderState::Published
                | CreateOrderState::PublishFailed
        )
    }

    /// Whether the order exists in storage once this state is reached
    #[inline]
    pub fn is_persisted(&self) -> bool {
        matches!(
            self,
            CreateOrderState::Persisted
                | CreateOrderState::Publishing
                | CreateOrderState::Published
                | CreateOrderState::PublishFailed
        )
    }
}

impl fmt::Display for CreateOrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CreateOrderState::Idle => "IDLE",
            CreateOrderState::Persisting => "PERSISTING",
            CreateOrderState::PersistFailed => "PERSIST_FAILED",
            CreateOrderState::Persisted => "PERSISTED",
            CreateOrderState::Publishing => "PUBLISHING",
            CreateOrderState::Published => "PUBLISHED",
            CreateOrderState::PublishFailed => "PUBLISH_FAILED",
        };
        write!(f, "{}", s)
    }
}

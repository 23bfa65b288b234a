//! Order engine error types

use thiserror::Error;

use super::types::{CreateOrderState, OrderId};

/// Failure reported by a [`Database`](super::ports::Database) adapter
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

/// Failure reported by a [`MessagingSystem`](super::ports::MessagingSystem) adapter
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Failed to deliver event: {0}")]
    Transport(String),

    #[error("Event receiver rejected event with status {0}")]
    Rejected(u16),

    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for PublishError {
    fn from(e: reqwest::Error) -> Self {
        PublishError::Transport(e.to_string())
    }
}

/// Outcome of a failed `create_order`
#[derive(Error, Debug)]
pub enum CreateOrderError {
    /// Nothing was stored and nothing was published
    #[error("Failed to persist order: {0}")]
    Persist(#[source] StoreError),

    /// The order is stored under `id` but was never announced
    #[error("Order {id} persisted but announcement failed: {source}")]
    Publish {
        id: OrderId,
        #[source]
        source: PublishError,
    },
}

impl CreateOrderError {
    /// Id of the order left in storage, if any
    pub fn persisted_id(&self) -> Option<OrderId> {
        match self {
            CreateOrderError::Persist(_) => None,
            CreateOrderError::Publish { id, .. } => Some(*id),
        }
    }

    pub fn state(&self) -> CreateOrderState {
        match self {
            CreateOrderError::Persist(_) => CreateOrderState::PersistFailed,
            CreateOrderError::Publish { .. } => CreateOrderState::PublishFailed,
        }
    }
}

//! Order Adapters
//!
//! Implementations of the order ports: PostgreSQL and in-memory storage,
//! webhook and log-only announcement.

pub mod memory;
pub mod messaging;
pub mod postgres;

// Re-export adapters for convenient access
pub use memory::InMemoryDatabase;
pub use messaging::{LogMessaging, WebhookMessaging};
pub use postgres::PgDatabase;

//! PostgreSQL order store
//!
//! Expects the table to exist (no migrations are run):
//!
//! ```sql
//! CREATE TABLE orders (
//!     id    BIGSERIAL PRIMARY KEY,
//!     title TEXT NOT NULL
//! );
//! ```

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{Instrument, Span, error, info};

use crate::orders::error::StoreError;
use crate::orders::ports::Database;
use crate::orders::types::{Order, OrderId};

/// PostgreSQL-backed [`Database`] adapter
pub struct PgDatabase {
    pool: PgPool,
    span: Span,
}

impl PgDatabase {
    /// Open a connection pool. The DSN is only ever logged with its
    /// credentials masked.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        span: Span,
    ) -> Result<Self, StoreError> {
        let safe_url = mask_credentials(database_url);
        span.in_scope(|| info!(url = %safe_url, "Opening database"));

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .instrument(span.clone())
            .await
            .map_err(|e| {
                span.in_scope(|| error!(url = %safe_url, error = %e, "Failed to open database"));
                StoreError::Database(e)
            })?;

        span.in_scope(|| info!("PostgreSQL connection pool established"));
        Ok(Self { pool, span })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Delete every order
    pub async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM orders")
            .execute(&self.pool)
            .instrument(self.span.clone())
            .await?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to be returned
    pub async fn close(&self) {
        self.span.in_scope(|| info!("Closing database"));
        self.pool.close().await;
    }
}

#[async_trait]
impl Database for PgDatabase {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn create_order(&self, title: &str) -> Result<OrderId, StoreError> {
        let id: OrderId =
            sqlx::query_scalar(r#"INSERT INTO orders (title) VALUES ($1) RETURNING id"#)
                .bind(title)
                .fetch_one(&self.pool)
                .instrument(self.span.clone())
                .await?;
        Ok(id)
    }

    async fn get_order(&self, id: OrderId) -> Result<Order, StoreError> {
        let order: Option<Order> =
            sqlx::query_as(r#"SELECT id, title FROM orders WHERE id = $1"#)
                .bind(id)
                .fetch_optional(&self.pool)
                .instrument(self.span.clone())
                .await?;
        order.ok_or(StoreError::NotFound)
    }
}

/// Log-safe form of a DSN: user info replaced with `xxx:xxx`, query dropped.
///
/// DSNs that cannot be rewritten (unparseable, or hostless socket DSNs such
/// as `postgres:///orders?host=/var/run/postgresql`) log as a fixed
/// placeholder; sqlx still gets the original.
pub fn mask_credentials(database_url: &str) -> String {
    const PLACEHOLDER: &str = "<unparseable dsn>";

    let Ok(mut url) = reqwest::Url::parse(database_url) else {
        return PLACEHOLDER.to_string();
    };
    if url.set_username("xxx").is_err() || url.set_password(Some("xxx")).is_err() {
        return PLACEHOLDER.to_string();
    }
    url.set_query(None);
    url.to_string()
}

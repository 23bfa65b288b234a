//! In-memory order store
//!
//! Used when no PostgreSQL URL is configured, and as a real store in tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::orders::error::StoreError;
use crate::orders::ports::Database;
use crate::orders::types::{Order, OrderId};

struct Inner {
    next_id: OrderId,
    orders: BTreeMap<OrderId, Order>,
}

/// Order store held in RAM, lost on restart
pub struct InMemoryDatabase {
    inner: Mutex<Inner>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::with_first_id(1)
    }

    /// Start id allocation at `first_id`
    pub fn with_first_id(first_id: OrderId) -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: first_id,
                orders: BTreeMap::new(),
            }),
        }
    }

    /// Number of stored orders. A poisoned lock still reports what it holds.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .orders
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("order store lock poisoned".to_string()))
    }
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn create_order(&self, title: &str) -> Result<OrderId, StoreError> {
        let mut inner = self.lock()?;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.orders.insert(id, Order::new(id, title));
        Ok(id)
    }

    async fn get_order(&self, id: OrderId) -> Result<Order, StoreError> {
        self.lock()?
            .orders
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

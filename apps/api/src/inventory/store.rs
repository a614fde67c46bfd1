//! In-memory inventory store.
//!
//! The store is the only owner of `Item` values; reads hand out clones. Every
//! operation takes the lock once and runs its checks and its mutation under that
//! one guard, so no caller can observe a half-applied change.
//!
//! State is per process. Two instances behind a load balancer each hold their
//! own collection and never see each other's writes.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tracing::{debug, info};

use crate::inventory::models::Item;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("Invalid item: {0}")]
    Invalid(String),

    #[error("Path id {path} does not match body id {body}")]
    IdMismatch { path: i64, body: i64 },

    #[error("Item with id {0} already exists")]
    Conflict(i64),

    #[error("Item {0} not found")]
    NotFound(i64),
}

#[derive(Debug, Default)]
pub struct InventoryStore {
    items: RwLock<Vec<Item>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All items, in insertion order.
    pub fn list(&self) -> Vec<Item> {
        self.read().clone()
    }

    pub fn get(&self, id: i64) -> Result<Item, StoreError> {
        self.read()
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    pub fn insert(&self, item: Item) -> Result<Item, StoreError> {
        item.validate().map_err(StoreError::Invalid)?;

        let mut items = self.write();
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(StoreError::Conflict(item.id));
        }
        items.push(item.clone());

        info!(id = item.id, total = items.len(), "Item inserted");
        Ok(item)
    }

    /// Overwrites the item stored under `id`, keeping its position.
    pub fn replace(&self, id: i64, item: Item) -> Result<Item, StoreError> {
        if item.id != id {
            return Err(StoreError::IdMismatch {
                path: id,
                body: item.id,
            });
        }
        item.validate().map_err(StoreError::Invalid)?;

        let mut items = self.write();
        let slot = items
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = item.clone();

        info!(id, "Item replaced");
        Ok(item)
    }

    /// Removes the item stored under `id` and returns it.
    pub fn delete(&self, id: i64) -> Result<Item, StoreError> {
        let mut items = self.write();
        let index = items
            .iter()
            .position(|existing| existing.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = items.remove(index);

        info!(id, total = items.len(), "Item deleted");
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the guard cannot leave the Vec half-mutated: every
    // mutation above is a single push/assign/remove after all checks.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Item>> {
        self.items.read().unwrap_or_else(|poisoned| {
            debug!("Recovering poisoned inventory lock");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Item>> {
        self.items.write().unwrap_or_else(|poisoned| {
            debug!("Recovering poisoned inventory lock");
            PoisonError::into_inner(poisoned)
        })
    }
}

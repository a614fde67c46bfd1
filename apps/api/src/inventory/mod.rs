// Inventory service: the Item entity, its in-memory store, and the CRUD handlers.

pub mod handlers;
pub mod models;
pub mod store;

pub use models::Item;
pub use store::{InventoryStore, StoreError};

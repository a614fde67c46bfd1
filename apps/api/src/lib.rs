//! Codelab API: an in-memory inventory CRUD service plus thin endpoints over
//! resume extraction and background removal.

pub mod config;
pub mod errors;
pub mod imaging;
pub mod inventory;
pub mod llm_client;
pub mod resume;
pub mod routes;
pub mod state;

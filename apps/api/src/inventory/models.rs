use serde::{Deserialize, Serialize};

/// A single inventory record. `id` is assigned by the caller and acts as the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

impl Item {
    pub fn new(id: i64, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            price,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Field-level checks that do not depend on store contents.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if !self.price.is_finite() {
            return Err("price must be a finite number".to_string());
        }
        if self.price < 0.0 {
            return Err(format!("price must be >= 0, got {}", self.price));
        }
        Ok(())
    }
}

/// Body returned by create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemMutationResponse {
    pub message: String,
    pub item: Item,
}

/// Body returned by delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDeletedResponse {
    pub message: String,
    pub id: i64,
}

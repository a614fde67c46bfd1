use std::sync::Arc;

use crate::imaging::BackgroundRemover;
use crate::inventory::InventoryStore;
use crate::resume::extractor::ApplicantExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// One store per process; see `inventory::store` for the isolation caveat.
    pub inventory: Arc<InventoryStore>,
    /// `None` when `OPENAI_API_KEY` is unset.
    pub extractor: Option<Arc<dyn ApplicantExtractor>>,
    /// `None` when `STABILITY_API_KEY` is unset.
    pub bg_remover: Option<Arc<dyn BackgroundRemover>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// State with an empty store and no upstream collaborators.
    pub fn new() -> Self {
        Self {
            inventory: Arc::new(InventoryStore::new()),
            extractor: None,
            bg_remover: None,
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn ApplicantExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn with_bg_remover(mut self, bg_remover: Arc<dyn BackgroundRemover>) -> Self {
        self.bg_remover = Some(bg_remover);
        self
    }
}

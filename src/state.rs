use std::sync::Arc;

use crate::application::services::ShortenerService;

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
}

impl AppState {
    pub fn new(shortener: Arc<ShortenerService>) -> Self {
        Self { shortener }
    }
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use tokio::sync::mpsc;

use shortly::api::handlers::{
    delete_mapping_handler, health_handler, list_mappings_handler, redirect_handler,
    shorten_handler,
};
use shortly::domain::click_event::ClickEvent;
use shortly::prelude::*;

pub const TEST_BASE_URL: &str = "http://sho.rt";
pub const TEST_CODE_LENGTH: usize = 6;

/// Builds an [`AppState`] over the given store, returning the click channel
/// receiver so tests can observe or drain click events.
pub fn create_test_state(
    store: Arc<dyn MappingStore>,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);
    let shortener = Arc::new(ShortenerService::new(
        store,
        tx,
        TEST_BASE_URL.to_string(),
        TEST_CODE_LENGTH,
    ));

    (AppState::new(shortener), rx)
}

/// State over a fresh in-memory store, with direct store access for seeding
/// and read-back.
pub fn create_memory_state() -> (AppState, mpsc::Receiver<ClickEvent>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let (state, rx) = create_test_state(store.clone());
    (state, rx, store)
}

/// The application's routes without the outer normalize-path wrapper, which
/// `TestServer` does not need.
pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/shorten", post(shorten_handler))
        .route("/api/mappings", get(list_mappings_handler))
        .route("/api/mappings/{code}", delete(delete_mapping_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
}

pub async fn seed_mapping(store: &dyn MappingStore, code: &str, url: &str, user: &str) {
    store
        .save(UrlMapping::new(
            code.to_string(),
            url.to_string(),
            user.to_string(),
        ))
        .await
        .unwrap();
}

pub async fn seed_expired_mapping(store: &dyn MappingStore, code: &str, url: &str, user: &str) {
    let mapping = UrlMapping::new(code.to_string(), url.to_string(), user.to_string())
        .with_expiry(Some(chrono::Utc::now() - chrono::Duration::hours(1)));
    store.save(mapping).await.unwrap();
}

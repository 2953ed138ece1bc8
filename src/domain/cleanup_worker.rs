//! Periodic cleanup pass removing expired mappings from storage.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::repositories::MappingStore;

/// Runs `cleanup_expired` on a fixed interval, starting immediately.
///
/// Reads already hide expired mappings; this pass reclaims the rows. A
/// failed pass is logged and retried on the next tick.
pub async fn run_cleanup_worker(store: Arc<dyn MappingStore>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        match store.cleanup_expired().await {
            Ok(0) => {}
            Ok(removed) => info!(removed, "removed expired mappings"),
            Err(e) => warn!(error = %e, "expired mapping cleanup failed"),
        }
    }
}

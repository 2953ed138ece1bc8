//! Background worker applying click increments off the request path.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::MappingStore;

/// Drains the click channel and increments counters one event at a time.
///
/// Click accounting is best-effort: an increment failure is logged at WARN
/// and never surfaces to the caller that produced the event. The worker
/// exits when every sender has been dropped.
pub async fn run_click_worker(mut rx: mpsc::Receiver<ClickEvent>, store: Arc<dyn MappingStore>) {
    while let Some(event) = rx.recv().await {
        if let Err(e) = store.increment_click_count(&event.code).await {
            warn!(code = %event.code, error = %e, "failed to increment click count");
        }
    }
    debug!("click channel closed, worker exiting");
}

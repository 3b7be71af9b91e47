//! Search input debouncing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Lets only the last of a burst of keystrokes through.
///
/// Each `settle` call waits for the delay and then yields its query only if no
/// newer call started in the meantime.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    latest: Arc<AtomicU64>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn settle(&self, query: impl Into<String>) -> Option<String> {
        let query = query.into();
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        (self.latest.load(Ordering::SeqCst) == ticket).then_some(query)
    }
}

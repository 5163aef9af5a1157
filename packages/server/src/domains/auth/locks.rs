use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-phone mutual exclusion.
///
/// Initiate/Verify/Fetch/Logout for one phone serialize on its lock while
/// operations on different phones interleave freely. Entries are never
/// reclaimed; the map is bounded by the distinct phones this process has
/// seen.
#[derive(Default)]
pub struct PhoneLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl PhoneLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a phone, waiting if another operation on the
    /// same phone is in flight.
    pub async fn acquire(&self, phone: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.lock().await;
            locks
                .entry(phone.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

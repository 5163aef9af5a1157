use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::kernel::BaseProviderConnection;

/// In-memory registry of logins awaiting code verification.
///
/// One entry per phone, last-write-wins: a second login initiation for the
/// same phone replaces the earlier handle, which is dropped and its
/// connection closed. Entries are consumed exactly once by `take`.
#[derive(Default)]
pub struct PendingLogins {
    inner: Mutex<HashMap<String, Box<dyn BaseProviderConnection>>>,
}

impl PendingLogins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pending login, replacing any earlier one for this phone.
    pub async fn put(&self, phone: &str, conn: Box<dyn BaseProviderConnection>) {
        let mut pending = self.inner.lock().await;
        if pending.insert(phone.to_string(), conn).is_some() {
            tracing::debug!("Replaced pending login for {}", phone);
        }
    }

    /// Remove and return the pending login for this phone, if any.
    pub async fn take(&self, phone: &str) -> Option<Box<dyn BaseProviderConnection>> {
        self.inner.lock().await.remove(phone)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

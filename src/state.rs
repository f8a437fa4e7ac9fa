use crate::models::Ledger;
use crate::storage::LedgerStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The store plus the current ledger. Each interaction holds the lock for its
/// whole read or append, so it works on a single snapshot.
#[derive(Clone)]
pub struct AppState {
    pub store: LedgerStore,
    pub ledger: Arc<Mutex<Ledger>>,
}

impl AppState {
    pub fn new(store: LedgerStore, ledger: Ledger) -> Self {
        Self {
            store,
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }
}

use crate::quote::QuoteBoard;
use crate::session_store::SessionStore;
use crate::storage::FileStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<SessionStore<FileStore>>>,
    pub quotes: Arc<QuoteBoard>,
}

impl AppState {
    pub fn new(store: SessionStore<FileStore>, quotes: QuoteBoard) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            quotes: Arc::new(quotes),
        }
    }
}

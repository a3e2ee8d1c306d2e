pub mod app;
pub mod calendar;
pub mod config;
pub mod counter;
pub mod digits;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod progress;
pub mod quote;
pub mod session_store;
pub mod state;
pub mod storage;
pub mod themes;
pub mod ui;

pub use app::router;
pub use config::{AppConfig, QuoteConfig};
pub use state::AppState;
pub use storage::FileStore;

pub mod app;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod progress_store;
pub mod quotes;
pub mod session;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use config::AppConfig;
pub use session::Session;
pub use state::AppState;
pub use storage::FileStore;

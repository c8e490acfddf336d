use crate::session::Session;
use crate::storage::FileStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session<FileStore>>>,
}

impl AppState {
    pub fn new(session: Session<FileStore>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }
}

use crate::document::Documents;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<Mutex<Documents>>,
}

impl AppState {
    pub fn new(documents: Documents) -> Self {
        Self {
            documents: Arc::new(Mutex::new(documents)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Documents::new())
    }
}

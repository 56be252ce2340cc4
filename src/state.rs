use std::sync::Arc;

use crate::repositories::CustomerRepository;

/// Router state. Cheap to clone; all clones share one repository.
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerRepository>,
}

impl AppState {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

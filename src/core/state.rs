// Application state (AppState)

use crate::stores::UserStore;
use std::sync::Arc;

/// Shared application state
///
/// Handed to every request handler. The store handle is created once at
/// startup and shared by all requests.
#[derive(Clone)]
pub struct AppState {
    /// User persistence
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

use crate::database::SharedStore;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: the store handle is behind an `Arc` and is created once at
/// startup, never per request.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

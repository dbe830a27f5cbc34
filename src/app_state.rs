//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::{dataset::DatasetSource, pagination::PaginationConfig};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where the transaction records are fetched from on every request.
    pub dataset: DatasetSource,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] that serves views of `dataset`.
    pub fn new(dataset: DatasetSource, pagination_config: PaginationConfig) -> Self {
        Self {
            dataset,
            pagination_config,
        }
    }
}

impl FromRef<AppState> for DatasetSource {
    fn from_ref(state: &AppState) -> Self {
        state.dataset.clone()
    }
}

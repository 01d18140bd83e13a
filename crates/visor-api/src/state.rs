//! # Application State
//!
//! Shared, read-only state passed to every handler via the `State`
//! extractor. Cloning is cheap: every field is an `Arc`.

use std::sync::Arc;

use visor_core::{TerritoryCollection, ViewerConfig};
use visor_query::FilterOptions;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ViewerConfig>,
    /// The territory collection, loaded once at startup.
    pub dataset: Arc<TerritoryCollection>,
    /// Dropdown values, computed once from `dataset`.
    pub options: Arc<FilterOptions>,
}

impl AppState {
    pub fn new(config: ViewerConfig, dataset: TerritoryCollection) -> Self {
        let options = FilterOptions::from_collection(&dataset);
        Self {
            config: Arc::new(config),
            dataset: Arc::new(dataset),
            options: Arc::new(options),
        }
    }
}

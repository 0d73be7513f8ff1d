use std::sync::Arc;

use kurz_core::Mapping;

#[derive(Clone)]
pub struct AppState {
    mapping: Arc<dyn Mapping>,
}

impl AppState {
    pub fn new(mapping: Arc<dyn Mapping>) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &dyn Mapping {
        self.mapping.as_ref()
    }
}

//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the document service only. Source files on disk are the single
//! source of truth, so there is no in-memory document cache to invalidate.

use std::sync::Arc;

use crate::config::Config;
use crate::services::document::{DocumentService, ProjectResolver};

#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<DocumentService>,
}

impl AppState {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let resolver = ProjectResolver::new(config.projects_root.clone(), config.project_page.clone());
        Self { documents: Arc::new(DocumentService::new(resolver, config.id_attribute.clone())) }
    }
}

//! Dublin Core record indexer
//!
//! Turns Dublin Core metadata records into the normalized field set used by
//! a search index, along with the keys a deduplication component matches
//! records on. The [`dc`] module holds the record processing core; the rest
//! of the crate exposes it as a small REST JSON service.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod dc;
pub mod error;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use dc::DcRecord;
pub use error::{AppError, AppResult, DcError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let services = services::Services::new(config.indexing.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}

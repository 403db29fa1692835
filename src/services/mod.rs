//! Business logic services

pub mod records;

use crate::config::IndexingConfig;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub records: records::RecordService,
}

impl Services {
    /// Create all services from the indexing configuration
    pub fn new(indexing_config: IndexingConfig) -> Self {
        Self {
            records: records::RecordService::new(indexing_config),
        }
    }
}

//! Record request and response models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dc::{DedupKeys, IndexFields};

/// A record payload as handed over by the harvester
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct RecordRequest {
    /// Dublin Core XML payload
    #[validate(length(min = 1, message = "Record payload must not be empty"))]
    pub data: String,
    /// OAI-PMH identifier (`oai:source:local-id`), empty for file imports
    #[serde(default)]
    pub oai_id: String,
    /// Source label
    #[validate(length(min = 1, message = "Source must not be empty"))]
    pub source: String,
}

/// Search index fields of a record
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IndexResponse {
    pub id: String,
    pub source: String,
    /// Field name to string or list of strings
    #[schema(value_type = Object)]
    pub fields: IndexFields,
}

/// Storage and export forms of a record
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SerializeResponse {
    pub id: String,
    /// Whitespace-trimmed form for storage
    pub serialized: String,
    /// Export form
    pub xml: String,
}

/// Deduplication keys of a record
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DedupResponse {
    pub id: String,
    pub keys: DedupKeys,
}

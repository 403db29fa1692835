//! Record indexing service
//!
//! Builds a [`DcRecord`] per request and projects it into index fields,
//! storage forms or deduplication keys. Records are never shared between
//! requests.

use validator::Validate;

use crate::{
    config::IndexingConfig,
    dc::DcRecord,
    error::{AppError, AppResult},
    models::record::{DedupResponse, IndexResponse, RecordRequest, SerializeResponse},
};

#[derive(Clone)]
pub struct RecordService {
    config: IndexingConfig,
}

impl RecordService {
    pub fn new(config: IndexingConfig) -> Self {
        Self { config }
    }

    /// Non-filing articles used for sort titles
    pub fn articles(&self) -> &[String] {
        &self.config.articles
    }

    /// Validate a request and build its record
    fn load(&self, request: &RecordRequest) -> AppResult<DcRecord> {
        request.validate()?;

        if request.data.len() > self.config.max_payload_bytes {
            return Err(AppError::BadRequest(format!(
                "Record payload is {} bytes, limit is {}",
                request.data.len(),
                self.config.max_payload_bytes
            )));
        }

        let record = DcRecord::new(&request.data, &request.oai_id, &request.source).map_err(|e| {
            tracing::warn!("Rejected record from source {}: {}", request.source, e);
            e
        })?;
        Ok(record)
    }

    /// Search index fields of a record
    pub fn index(&self, request: &RecordRequest) -> AppResult<IndexResponse> {
        let record = self.load(request)?;
        let fields = record.to_index_fields(self.articles());

        tracing::debug!(
            "Indexed record {} from {} ({} fields)",
            record.id(),
            record.source(),
            fields.len()
        );

        Ok(IndexResponse {
            id: record.id().to_string(),
            source: record.source().to_string(),
            fields,
        })
    }

    /// Storage and export forms of a record
    pub fn serialize(&self, request: &RecordRequest) -> AppResult<SerializeResponse> {
        let record = self.load(request)?;

        Ok(SerializeResponse {
            id: record.id().to_string(),
            serialized: record.serialize(),
            xml: record.to_xml(),
        })
    }

    /// Deduplication keys of a record
    pub fn dedup(&self, request: &RecordRequest) -> AppResult<DedupResponse> {
        let record = self.load(request)?;

        Ok(DedupResponse {
            id: record.id().to_string(),
            keys: record.dedup_keys(self.articles()),
        })
    }
}

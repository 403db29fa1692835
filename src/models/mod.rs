//! Request and response models

pub mod record;

pub use record::{DedupResponse, IndexResponse, RecordRequest, SerializeResponse};

//! Record indexing endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::record::{DedupResponse, IndexResponse, RecordRequest, SerializeResponse},
    AppState,
};

/// Build the search index fields of a record
#[utoipa::path(
    post,
    path = "/records/index",
    tag = "records",
    request_body = RecordRequest,
    responses(
        (status = 200, description = "Index fields", body = IndexResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 422, description = "Malformed record or missing identifier", body = crate::error::ErrorResponse)
    )
)]
pub async fn index_record(
    State(state): State<AppState>,
    Json(request): Json<RecordRequest>,
) -> AppResult<Json<IndexResponse>> {
    let response = state.services.records.index(&request)?;
    Ok(Json(response))
}

/// Return the storage and export forms of a record
#[utoipa::path(
    post,
    path = "/records/serialize",
    tag = "records",
    request_body = RecordRequest,
    responses(
        (status = 200, description = "Serialized record", body = SerializeResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 422, description = "Malformed record or missing identifier", body = crate::error::ErrorResponse)
    )
)]
pub async fn serialize_record(
    State(state): State<AppState>,
    Json(request): Json<RecordRequest>,
) -> AppResult<Json<SerializeResponse>> {
    let response = state.services.records.serialize(&request)?;
    Ok(Json(response))
}

/// Return the deduplication keys of a record
#[utoipa::path(
    post,
    path = "/records/dedup",
    tag = "records",
    request_body = RecordRequest,
    responses(
        (status = 200, description = "Deduplication keys", body = DedupResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 422, description = "Malformed record or missing identifier", body = crate::error::ErrorResponse)
    )
)]
pub async fn dedup_record(
    State(state): State<AppState>,
    Json(request): Json<RecordRequest>,
) -> AppResult<Json<DedupResponse>> {
    let response = state.services.records.dedup(&request)?;
    Ok(Json(response))
}

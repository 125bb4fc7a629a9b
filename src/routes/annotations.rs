//! Annotation API endpoints
//!
//! Confirming the pending selection, listing the log, and saving it to disk.

use std::path::PathBuf;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::session::Annotation;
use crate::state::AppState;
use crate::storage;

/// Create the annotations router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_annotations).post(confirm_annotation))
        .route("/save", post(save_annotations))
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct AnnotationResponse {
    pub annotation: Annotation,
}

#[derive(Debug, Serialize)]
pub struct AnnotationsListResponse {
    pub annotations: Vec<Annotation>,
    pub total: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveRequest {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub saved: usize,
    pub path: String,
}

/// List the session's annotations in confirmation order
async fn list_annotations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnnotationsListResponse>> {
    let annotations = state.sessions().annotations(id).await?;
    let total = annotations.len();

    Ok(Json(AnnotationsListResponse { annotations, total }))
}

/// Confirm the pending selection under the given label
async fn confirm_annotation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ConfirmRequest>,
) -> Result<(StatusCode, Json<AnnotationResponse>)> {
    let annotation = state.sessions().confirm(id, &req.label).await?;
    Ok((StatusCode::CREATED, Json(AnnotationResponse { annotation })))
}

/// Save the session's annotation log to disk.
///
/// Uses the configured output path unless the request names one. On failure
/// the log stays in memory untouched and the error is reported, so the save
/// can be retried.
async fn save_annotations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<SaveRequest>>,
) -> Result<Json<SaveResponse>> {
    let annotations = state.sessions().annotations(id).await?;

    let path = body
        .and_then(|Json(req)| req.path)
        .unwrap_or_else(|| state.config().annotator.output_path.clone());

    storage::write_annotations(&path, &annotations)
        .await
        .map_err(|e| AppError::Persist(format!("{e:#}")))?;

    tracing::info!(
        session_id = %id,
        count = annotations.len(),
        path = %path.display(),
        "Saved annotation log"
    );

    Ok(Json(SaveResponse {
        saved: annotations.len(),
        path: path.display().to_string(),
    }))
}

//! Label API endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::state::AppState;

/// Create the labels router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_labels).post(add_label))
}

#[derive(Debug, Deserialize)]
pub struct AddLabelRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct LabelsResponse {
    pub labels: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AddLabelResponse {
    pub labels: Vec<String>,
    pub added: bool,
}

/// List the session's entity labels
async fn list_labels(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LabelsResponse>> {
    let labels = state.sessions().labels(id).await?;
    Ok(Json(LabelsResponse { labels }))
}

/// Append a label to the session's label set.
///
/// Appending a label that already exists is a no-op, reported via `added`.
async fn add_label(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddLabelRequest>,
) -> Result<Json<AddLabelResponse>> {
    let added = state.sessions().add_label(id, &req.name).await?;
    let labels = state.sessions().labels(id).await?;

    Ok(Json(AddLabelResponse { labels, added }))
}

//! Document API endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::state::AppState;

/// Create the document router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_document).put(set_document))
}

#[derive(Debug, Deserialize)]
pub struct SetDocumentRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SetDocumentResponse {
    #[serde(rename = "charCount")]
    pub char_count: usize,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub text: String,
}

/// Replace the session's document.
///
/// Clears any pending selection. Annotations made against the previous
/// document keep their original offsets.
async fn set_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetDocumentRequest>,
) -> Result<Json<SetDocumentResponse>> {
    let char_count = req.text.chars().count();
    state.sessions().set_document(id, req.text).await?;

    Ok(Json(SetDocumentResponse { char_count }))
}

/// Get the session's current document
async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentResponse>> {
    let text = state.sessions().document(id).await?;
    Ok(Json(DocumentResponse { text }))
}

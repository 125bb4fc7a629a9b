//! Selection bridge endpoints
//!
//! `/callback` is the receiving end of the browser selection snippet. The
//! snippet fires and forgets, so every outcome (accepted, malformed,
//! duplicate, stale) answers `204 No Content`. Malformed and rejected
//! events are logged and dropped, never surfaced as errors.

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::selection::SelectionEvent;
use crate::session::{PendingSelection, SessionError};
use crate::state::AppState;

/// Create the selection router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_pending))
        .route("/callback", get(selection_callback))
}

#[derive(Debug, Serialize)]
pub struct PendingResponse {
    pub pending: Option<PendingSelection>,
}

/// Get the session's pending selection, if any
async fn get_pending(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PendingResponse>> {
    let pending = state.sessions().pending(id).await?;
    Ok(Json(PendingResponse { pending }))
}

/// Receive a selection report from the browser snippet
async fn selection_callback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    RawQuery(query): RawQuery,
) -> Result<StatusCode> {
    let Some(event) = query.as_deref().and_then(SelectionEvent::from_query) else {
        tracing::debug!(session_id = %id, "Discarding malformed selection event");
        return Ok(StatusCode::NO_CONTENT);
    };

    match state.sessions().receive_selection(id, event.into()).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(SessionError::Store(reason)) => {
            tracing::debug!(session_id = %id, %reason, "Selection event rejected");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => Err(err.into()),
    }
}

//! Session API endpoints
//!
//! Everything a session owns (document, labels, selection, annotations)
//! lives under `/api/v1/sessions/{id}/`.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Serialize;
use uuid::Uuid;

use crate::state::AppState;

/// Create the sessions router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .nest("/{id}/document", super::document::router())
        .nest("/{id}/labels", super::labels::router())
        .nest("/{id}/selection", super::selection::router())
        .nest("/{id}/annotations", super::annotations::router())
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
}

/// Create a new annotation session
async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.sessions().create_session().await;
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse { session_id }),
    )
}

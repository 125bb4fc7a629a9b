//! Annotator page
//!
//! Serves the single HTML page. A request without a usable session is
//! redirected into a fresh one, so opening `/` always lands on a working
//! annotator.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::html;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    session: Option<String>,
}

/// Render the annotator page for the session in the query string, creating
/// a session (and redirecting to it) when there is none.
pub async fn annotator_page(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Response {
    let session_id = params
        .session
        .as_deref()
        .and_then(|raw| Uuid::parse_str(raw).ok());

    if let Some(id) = session_id {
        if let Ok(snapshot) = state.sessions().snapshot(id).await {
            return Html(html::render_page(id, &snapshot)).into_response();
        }
    }

    // No session, an unparseable id, or an expired one: start fresh
    let id = state.sessions().create_session().await;
    Redirect::to(&format!("/?session={id}")).into_response()
}

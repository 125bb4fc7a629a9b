//! Span Annotator Server
//!
//! A minimal manual named-entity annotation tool. The user pastes free
//! text, selects spans with the pointer in the browser, assigns entity
//! labels, and saves the resulting `(text, start, end, label)` log to disk.
//!
//! # Modules
//!
//! - `session`: session-scoped annotation state (document, labels, pending
//!   selection, annotation log)
//! - `selection`: the receiving side of the browser selection bridge
//! - `storage`: annotation log persistence (pretty-printed JSON)
//! - `html`: the annotator page and its selection snippet
//! - `routes`: HTTP API
//!
//! The main server binary is in main.rs; [`app`] builds the full router for
//! both the binary and the integration tests.

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod html;
pub mod routes;
pub mod selection;
pub mod session;
pub mod state;
pub mod storage;

use state::AppState;

/// Build the complete application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::page::annotator_page))
        .route("/health", get(routes::health::health_check))
        .route("/api/v1/health", get(routes::health::health_check))
        .nest("/api/v1/sessions", routes::sessions::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The editor runs in the browser and posts one commit per finished gesture
//! to the project's update endpoint. The element listing seeds the editor's
//! registry from the page source, which remains the source of truth.

pub mod elements;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/projects/{project}/update-element", post(elements::update_element))
        .route("/api/projects/{project}/elements", get(elements::list_elements))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

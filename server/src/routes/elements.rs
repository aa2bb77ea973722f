//! Element routes: commit a layout patch, list tagged elements.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::warn;
use wire::{ElementSummary, UpdateElementRequest, UpdateElementResponse};

use crate::error::error_response;
use crate::state::AppState;

#[cfg(test)]
#[path = "elements_test.rs"]
mod elements_test;

type Failure = (StatusCode, Json<UpdateElementResponse>);

/// `POST /api/projects/{project}/update-element`
pub async fn update_element(
    State(state): State<AppState>,
    Path(project): Path<String>,
    payload: Result<Json<UpdateElementRequest>, JsonRejection>,
) -> (StatusCode, Json<UpdateElementResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(%project, error = %rejection, "update-element body rejected");
            return error_response(&rejection);
        }
    };
    match state.documents.update_element(&project, &request).await {
        Ok(_) => (StatusCode::OK, Json(UpdateElementResponse::ok())),
        Err(e) => {
            warn!(%project, id = %request.selected_id, error = %e, "update-element failed");
            error_response(&e)
        }
    }
}

/// `GET /api/projects/{project}/elements`
pub async fn list_elements(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> Result<Json<Vec<ElementSummary>>, Failure> {
    state.documents.list_elements(&project).await.map(Json).map_err(|e| {
        warn!(%project, error = %e, "list elements failed");
        error_response(&e)
    })
}

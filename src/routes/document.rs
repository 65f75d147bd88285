//! Document save and load.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use super::board::SceneResponse;
use super::load_error_to_status;
use crate::services::loader;
use crate::state::AppState;

pub const DOCUMENT_FILENAME: &str = "table_data.json";

/// Serialize the live scene as a pretty-printed download.
pub async fn save_document(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let doc = state.board.read().await.serialize_document();
    let body = doc.to_json_pretty().map_err(|e| {
        warn!(error = %e, "table serialize failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    info!(cards = doc.cards.len(), texts = doc.texts.len(), "table saved");

    Ok((
        [
            (CONTENT_TYPE, "application/json".to_owned()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{DOCUMENT_FILENAME}\"")),
        ],
        body,
    )
        .into_response())
}

/// Replace the scene with an uploaded document. A bad upload changes nothing.
pub async fn load_document(State(state): State<AppState>, body: String) -> Result<Json<SceneResponse>, StatusCode> {
    loader::load_document_text(&state, &body)
        .await
        .map_err(|e| load_error_to_status(&e))?;
    let board = state.board.read().await;
    Ok(Json(SceneResponse::from(&*board)))
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;

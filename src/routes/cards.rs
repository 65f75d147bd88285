//! Content-source routes: reload-merge and confirmed reset.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use scene::engine::MergeOutcome;
use serde::Serialize;

use super::board::SceneResponse;
use super::load_error_to_status;
use crate::services::loader;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub updated: usize,
    pub added: usize,
    pub scene: SceneResponse,
}

/// Merge refreshed content-source records into the board.
///
/// Refused with 409 outside document mode; the board is left as it was.
pub async fn reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, StatusCode> {
    let outcome = loader::reload_cards(&state).await.map_err(|e| load_error_to_status(&e))?;
    let MergeOutcome::Applied(summary) = outcome else {
        return Err(StatusCode::CONFLICT);
    };
    let board = state.board.read().await;
    Ok(Json(ReloadResponse { updated: summary.updated, added: summary.added, scene: SceneResponse::from(&*board) }))
}

/// Confirmed reset: rebuild the board from an uploaded content source.
pub async fn reset(State(state): State<AppState>, body: String) -> Result<Json<SceneResponse>, StatusCode> {
    loader::reset_with_text(&state, &body).await.map_err(|e| load_error_to_status(&e))?;
    let board = state.board.read().await;
    Ok(Json(SceneResponse::from(&*board)))
}

#[cfg(test)]
#[path = "cards_test.rs"]
mod tests;

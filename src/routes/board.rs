//! Board routes: read the layered board, forward input, and issue toolbar
//! commands. Every mutating route answers with the scene as it now stands.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use scene::doc::{TextEdit, TextId};
use scene::engine::{Action, Board, Mode};
use scene::input::{DraggedItem, ElementKind, ElementRef, InputEvent};
use scene::render::{self, CardView, Layer};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SceneResponse {
    pub title: String,
    pub zoom: f64,
    pub mode: Mode,
    pub can_reload: bool,
    pub max_z_index: i64,
    /// Kind of element under an active drag, if any.
    pub dragging: Option<ElementKind>,
    pub pending_removal: Option<ElementRef>,
    pub layers: Vec<Layer>,
    /// The card shown in the detail panel.
    pub detail: Option<CardView>,
}

impl From<&Board> for SceneResponse {
    fn from(board: &Board) -> Self {
        let scene = board.scene();
        Self {
            title: scene.title().to_owned(),
            zoom: scene.zoom().factor(),
            mode: board.mode(),
            can_reload: board.mode().allows_reload(),
            max_z_index: scene.max_z_index(),
            dragging: board.drag().map(DraggedItem::kind),
            pending_removal: board.pending_removal().cloned(),
            layers: render::layers(scene),
            detail: board.selected_card().map(CardView::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub actions: Vec<Action>,
    pub scene: SceneResponse,
}

#[derive(Debug, Serialize)]
pub struct AddTextResponse {
    pub id: TextId,
    pub scene: SceneResponse,
}

#[derive(Debug, Deserialize)]
pub struct TitleBody {
    pub title: String,
}

pub async fn get_scene(State(state): State<AppState>) -> Json<SceneResponse> {
    let board = state.board.read().await;
    Json(SceneResponse::from(&*board))
}

pub async fn post_event(State(state): State<AppState>, Json(event): Json<InputEvent>) -> Json<EventResponse> {
    let mut board = state.board.write().await;
    let actions = board.handle(event);
    Json(EventResponse { actions, scene: SceneResponse::from(&*board) })
}

pub async fn zoom_in(State(state): State<AppState>) -> Json<SceneResponse> {
    let mut board = state.board.write().await;
    board.zoom_in();
    Json(SceneResponse::from(&*board))
}

pub async fn zoom_out(State(state): State<AppState>) -> Json<SceneResponse> {
    let mut board = state.board.write().await;
    board.zoom_out();
    Json(SceneResponse::from(&*board))
}

pub async fn put_title(State(state): State<AppState>, Json(body): Json<TitleBody>) -> Json<SceneResponse> {
    let mut board = state.board.write().await;
    board.set_title(body.title);
    Json(SceneResponse::from(&*board))
}

pub async fn add_text(State(state): State<AppState>) -> (StatusCode, Json<AddTextResponse>) {
    let mut board = state.board.write().await;
    let id = board.add_text();
    info!(id, "text added");
    (StatusCode::CREATED, Json(AddTextResponse { id, scene: SceneResponse::from(&*board) }))
}

pub async fn patch_text(
    State(state): State<AppState>,
    Path(id): Path<TextId>,
    Json(edit): Json<TextEdit>,
) -> Result<Json<SceneResponse>, StatusCode> {
    let mut board = state.board.write().await;
    board.edit_text(id, &edit).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(SceneResponse::from(&*board)))
}

/// Ask to remove an element; the response shows it as pending.
pub async fn request_removal(
    State(state): State<AppState>,
    Json(element): Json<ElementRef>,
) -> Result<Json<SceneResponse>, StatusCode> {
    let mut board = state.board.write().await;
    if !board.request_removal(element) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(SceneResponse::from(&*board)))
}

pub async fn confirm_removal(State(state): State<AppState>) -> Result<Json<SceneResponse>, StatusCode> {
    let mut board = state.board.write().await;
    let removed = board.confirm_removal().ok_or(StatusCode::NOT_FOUND)?;
    info!(?removed, "element removed");
    Ok(Json(SceneResponse::from(&*board)))
}

pub async fn cancel_removal(State(state): State<AppState>) -> Json<SceneResponse> {
    let mut board = state.board.write().await;
    board.cancel_removal();
    Json(SceneResponse::from(&*board))
}

pub async fn close_detail(State(state): State<AppState>) -> Json<SceneResponse> {
    let mut board = state.board.write().await;
    board.deselect_card();
    Json(SceneResponse::from(&*board))
}

#[cfg(test)]
#[path = "board_test.rs"]
mod tests;

//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host surface drives the board over plain JSON endpoints: it forwards
//! pointer and keyboard events, issues toolbar commands, and reads back the
//! layered scene to draw. Documents and content sources move as request and
//! response bodies.

pub mod board;
pub mod cards;
pub mod document;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post, put};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::services::loader::LoadError;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/scene", get(board::get_scene))
        .route("/api/events", post(board::post_event))
        .route("/api/zoom/in", post(board::zoom_in))
        .route("/api/zoom/out", post(board::zoom_out))
        .route("/api/title", put(board::put_title))
        .route("/api/texts", post(board::add_text))
        .route("/api/texts/{id}", patch(board::patch_text))
        .route("/api/removal", post(board::request_removal))
        .route("/api/removal/confirm", post(board::confirm_removal))
        .route("/api/removal/cancel", post(board::cancel_removal))
        .route("/api/detail", delete(board::close_detail))
        .route("/api/document", get(document::save_document).post(document::load_document))
        .route("/api/cards/reload", post(cards::reload))
        .route("/api/cards/reset", post(cards::reset))
        .route("/healthz", get(healthz))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub(crate) fn load_error_to_status(err: &LoadError) -> StatusCode {
    match err {
        LoadError::Fetch(_) => StatusCode::BAD_GATEWAY,
        LoadError::Source(_) | LoadError::Document(_) => StatusCode::BAD_REQUEST,
        LoadError::Superseded | LoadError::NoContentSource => StatusCode::CONFLICT,
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

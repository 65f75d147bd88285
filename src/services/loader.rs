//! Whole-scene loads: startup, document load, ingestion, reload-merge, reset.
//!
//! DESIGN
//! ======
//! Every load follows the same shape:
//!
//! 1. take a ticket from the load sequence
//! 2. fetch and parse with no lock held
//! 3. take the board write lock and apply, unless a newer load has started
//!
//! A load that loses the race is discarded with `LoadError::Superseded`, so
//! results never land out of order. Parse failures leave the board untouched
//! because the board only ever swaps in a fully built scene.

use scene::doc::{DocError, Document, SourceRecords};
use scene::engine::{MergeOutcome, Mode};
use thiserror::Error;
use tracing::{info, warn};

use crate::services::fetch::{FetchError, fetch_text};
use crate::services::source::{SourceError, parse_source};
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Document(#[from] DocError),
    #[error("superseded by a newer load")]
    Superseded,
    #[error("no content source is configured")]
    NoContentSource,
}

// =============================================================================
// STARTUP
// =============================================================================

/// Populate the board according to the configured mode.
///
/// Content-source mode with a cards location ingests from it; everything
/// else loads the table document.
///
/// # Errors
///
/// Returns a `LoadError` if the chosen location cannot be fetched or parsed.
pub async fn startup(state: &AppState) -> Result<(), LoadError> {
    match (state.config.mode, state.config.cards_location.as_deref()) {
        (Mode::ContentSource, Some(location)) => {
            info!(%location, "initializing table from content source");
            ingest_from(state, location).await
        }
        _ => {
            let location = state.config.table_location.as_str();
            info!(%location, "initializing table from document");
            load_document_from(state, location).await
        }
    }
}

// =============================================================================
// DOCUMENT LOADS
// =============================================================================

/// Fetch a saved document from `location` and replace the scene with it.
///
/// # Errors
///
/// Returns a `LoadError` on fetch or parse failure, or if a newer load
/// started while this one was fetching.
pub async fn load_document_from(state: &AppState, location: &str) -> Result<(), LoadError> {
    let ticket = state.loads.begin();
    let text = fetch_text(&state.http, location).await.inspect_err(|e| warn!(error = %e, "table fetch failed"))?;
    apply_document(state, ticket, &text).await
}

/// Replace the scene with a document supplied as text (user upload).
///
/// # Errors
///
/// Returns a `LoadError` if the text is not a valid document.
pub async fn load_document_text(state: &AppState, text: &str) -> Result<(), LoadError> {
    let ticket = state.loads.begin();
    apply_document(state, ticket, text).await
}

async fn apply_document(state: &AppState, ticket: u64, text: &str) -> Result<(), LoadError> {
    let doc = Document::from_json(text).inspect_err(|e| warn!(error = %e, "table parse failed"))?;
    let mut board = state.board.write().await;
    if !state.loads.is_current(ticket) {
        warn!(ticket, "discarding superseded table load");
        return Err(LoadError::Superseded);
    }
    board.load_document(doc).inspect_err(|e| warn!(error = %e, "table rejected"))?;
    let scene = board.scene();
    info!(title = %scene.title(), cards = scene.cards().len(), texts = scene.texts().len(), "table loaded");
    Ok(())
}

// =============================================================================
// CONTENT-SOURCE LOADS
// =============================================================================

/// Fetch content-source records and build a brand-new scene from them.
///
/// # Errors
///
/// Returns a `LoadError` on fetch or parse failure, or if superseded.
pub async fn ingest_from(state: &AppState, location: &str) -> Result<(), LoadError> {
    let ticket = state.loads.begin();
    let records = fetch_records(state, location).await?;
    let mut board = state.board.write().await;
    if !state.loads.is_current(ticket) {
        warn!(ticket, "discarding superseded ingestion");
        return Err(LoadError::Superseded);
    }
    board.ingest(&records, &mut rand::rng());
    info!(cards = records.len(), "table initialized from content source");
    Ok(())
}

/// Refresh card content from the configured content source.
///
/// Outside document mode this is a no-op reported as `NotPermitted`, and
/// nothing is fetched.
///
/// # Errors
///
/// Returns a `LoadError` if no content source is configured, on fetch or
/// parse failure, or if superseded.
pub async fn reload_cards(state: &AppState) -> Result<MergeOutcome, LoadError> {
    let mode = state.board.read().await.mode();
    if !mode.allows_reload() {
        info!(?mode, "reload ignored outside document mode");
        return Ok(MergeOutcome::NotPermitted);
    }
    let location = state.config.cards_location.as_deref().ok_or(LoadError::NoContentSource)?;

    let ticket = state.loads.begin();
    let records = fetch_records(state, location).await?;
    let mut board = state.board.write().await;
    if !state.loads.is_current(ticket) {
        warn!(ticket, "discarding superseded reload");
        return Err(LoadError::Superseded);
    }
    let outcome = board.merge_reload(&records);
    if let MergeOutcome::Applied(summary) = outcome {
        info!(updated = summary.updated, added = summary.added, "cards reloaded");
    }
    Ok(outcome)
}

/// Confirmed reset: rebuild the scene from user-supplied content-source text.
/// The board leaves document mode, so later reloads are refused.
///
/// # Errors
///
/// Returns a `LoadError` if the text does not parse or a newer load started.
pub async fn reset_with_text(state: &AppState, text: &str) -> Result<(), LoadError> {
    let ticket = state.loads.begin();
    let records = parse_source(text).inspect_err(|e| warn!(error = %e, "reset source rejected"))?;
    let mut board = state.board.write().await;
    if !state.loads.is_current(ticket) {
        warn!(ticket, "discarding superseded reset");
        return Err(LoadError::Superseded);
    }
    board.reset_with_source(&records, &mut rand::rng());
    info!(cards = records.len(), "table reset from uploaded content source");
    Ok(())
}

async fn fetch_records(state: &AppState, location: &str) -> Result<SourceRecords, LoadError> {
    let text = fetch_text(&state.http, location)
        .await
        .inspect_err(|e| warn!(error = %e, "content source fetch failed"))?;
    let records = parse_source(&text).inspect_err(|e| warn!(error = %e, "content source parse failed"))?;
    Ok(records)
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;

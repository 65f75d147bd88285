//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the one live board behind a `RwLock`, the startup config, a shared
//! HTTP client for content-source fetches, and the load sequence.
//!
//! Whole-scene loads fetch without holding the lock. Each load takes a ticket
//! from `LoadSequence` before fetching and only applies its result if no
//! newer load started in the meantime, so the last-started load always wins.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use scene::engine::Board;
use tokio::sync::RwLock;

use crate::config::Config;

// =============================================================================
// LOAD SEQUENCE
// =============================================================================

/// Monotonic ticket counter for whole-scene loads.
#[derive(Debug, Clone, Default)]
pub struct LoadSequence(Arc<AtomicU64>);

impl LoadSequence {
    /// Start a load and return its ticket.
    #[must_use]
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `ticket` belongs to the most recently started load.
    #[must_use]
    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<RwLock<Board>>,
    pub config: Arc<Config>,
    pub http: reqwest::Client,
    pub loads: LoadSequence,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let board = Board::new(config.mode);
        Self {
            board: Arc::new(RwLock::new(board)),
            config: Arc::new(config),
            http: reqwest::Client::new(),
            loads: LoadSequence::default(),
        }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

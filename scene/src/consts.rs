//! Shared numeric constants for the scene crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const ZOOM_MIN: f64 = 0.5;

/// Largest allowed zoom factor.
pub const ZOOM_MAX: f64 = 2.0;

/// Zoom change per step control activation.
pub const ZOOM_STEP: f64 = 0.1;

/// Zoom change per wheel delta unit while the zoom modifier is held.
pub const WHEEL_ZOOM_FACTOR: f64 = 0.01;

// ── Placement ───────────────────────────────────────────────────

/// Offset of the ingestion scatter square from the surface origin.
pub const SCATTER_OFFSET: f64 = 10.0;

/// Side of the ingestion scatter square; positions land in `[offset, offset + span)`.
pub const SCATTER_SPAN: u32 = 300;

/// Columns in the grid used to place cards first seen during a reload.
pub const GRID_COLUMNS: usize = 5;

/// Distance between neighbouring grid cells.
pub const GRID_PITCH: f64 = 120.0;

/// Margin of the first grid cell from the surface origin.
pub const GRID_MARGIN: f64 = 10.0;

// ── Text notes ──────────────────────────────────────────────────

/// Content of a freshly added note.
pub const NEW_TEXT_CONTENT: &str = "New Text";

/// Position of a freshly added note.
pub const NEW_TEXT_POS: (f64, f64) = (50.0, 50.0);

/// Colour applied to new notes and to loaded notes without one.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Font size applied to new notes and to loaded notes without one.
pub const DEFAULT_FONT_SIZE: u32 = 24;

/// Smallest font size an edit may set.
pub const MIN_FONT_SIZE: u32 = 8;

/// Largest font size an edit may set.
pub const MAX_FONT_SIZE: u32 = 72;

// ── Titles ──────────────────────────────────────────────────────

/// Title of a board before anything is loaded.
pub const INITIAL_TITLE: &str = "Title";

/// Title given to a board built fresh from a content source.
pub const INGESTED_TITLE: &str = "New Table";

// ── Footprints (scene units) ────────────────────────────────────

/// Card width.
pub const CARD_WIDTH: f64 = 135.0;

/// Card height.
pub const CARD_HEIGHT: f64 = 50.0;

/// Minimum text-note width.
pub const TEXT_MIN_WIDTH: f64 = 150.0;

/// Minimum text-note height.
pub const TEXT_MIN_HEIGHT: f64 = 30.0;

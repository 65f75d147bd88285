//! Scene-state engine for the card table board.
//!
//! This crate owns everything that decides *where* things are on the board
//! and *which* of them is on top: card and text-note positions, stacking
//! order, the per-note selection/edit state machine, drag gestures under
//! zoom, and the document load/save and content-source merge rules. It does
//! no I/O. The host fetches and parses content sources and documents, feeds
//! the results in, and reads back [`render::Layer`]s and [`doc::Document`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::Board`]: the interaction controller and event dispatch |
//! | [`scene`] | The [`scene::Scene`] aggregate, selection transitions, load/ingest/merge |
//! | [`doc`] | Cards, text notes, the document and content-source shapes |
//! | [`zorder`] | Stacking-priority counter and front-raise rule |
//! | [`camera`] | Zoom clamp and screen-to-scene conversions |
//! | [`input`] | Input event types, drag record, text interaction states |
//! | [`hit`] | Hit-testing pointer positions against element footprints |
//! | [`render`] | Renderer-facing layered element list and card detail view |
//! | [`consts`] | Shared numeric constants (zoom limits, defaults, layout grid) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod render;
pub mod scene;
pub mod zorder;

//! Document model: cards, text notes, and the shapes that cross the host boundary.
//!
//! This module defines the entities placed on the board (`Card`, `TextElement`),
//! the content-only projection of a card that a content source supplies
//! (`CardFields`), the ordered content-source mapping (`SourceRecords`), a
//! sparse-update type for note edits (`TextEdit`), and the save/load artifact
//! (`Document`).
//!
//! Documents use camelCase field names on the wire (`zIndex`, `isEditing`,
//! `isSelected`, `fontSize`). Loading is tolerant of the gaps older documents
//! carry: missing or empty note colours and sizes fall back to defaults, and
//! missing card content fields read as empty. Position and identity fields are
//! always required.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::{DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR, MAX_FONT_SIZE, MIN_FONT_SIZE};

/// Identifier of a text note. Generated from wall-clock milliseconds.
pub type TextId = u64;

#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate card key in document: {0}")]
    DuplicateCardKey(String),
    #[error("duplicate text id in document: {0}")]
    DuplicateTextId(TextId),
    #[error("duplicate card key in content source: {0}")]
    DuplicateSourceKey(String),
    #[error("{0} notes are in edit mode; at most one may be")]
    MultipleEditing(usize),
}

// =============================================================================
// CARDS
// =============================================================================

/// Content fields of a card, as supplied by a content source.
///
/// These are the fields a reload overwrites; position and stacking live on
/// [`Card`] and survive reloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFields {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub arxiv: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub github: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
}

/// One structured-content item placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Stable identity; the merge key across reloads.
    pub key: String,
    #[serde(flatten)]
    pub fields: CardFields,
    /// Left edge in scene units.
    pub x: f64,
    /// Top edge in scene units.
    pub y: f64,
    /// Stacking priority; higher draws on top.
    pub z_index: i64,
}

impl Card {
    #[must_use]
    pub fn new(key: impl Into<String>, fields: CardFields, x: f64, y: f64, z_index: i64) -> Self {
        Self { key: key.into(), fields, x, y, z_index }
    }

    /// External links worth rendering, labelled, in display order.
    ///
    /// A link field is only offered when it holds an absolute URL; anything
    /// else (placeholders, bare ids) is plain text.
    #[must_use]
    pub fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("Website", self.fields.website.as_str()),
            ("ArXiv", self.fields.arxiv.as_str()),
            ("GitHub", self.fields.github.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| is_absolute_url(url))
        .collect()
    }
}

/// Whether `value` looks like an absolute web URL.
fn is_absolute_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

// =============================================================================
// TEXT NOTES
// =============================================================================

/// A free-form note placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub id: TextId,
    pub content: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub is_editing: bool,
    #[serde(default)]
    pub is_selected: bool,
    #[serde(default = "default_color", deserialize_with = "color_or_default")]
    pub color: String,
    #[serde(default = "default_font_size", deserialize_with = "font_size_or_default")]
    pub font_size: u32,
    #[serde(default)]
    pub z_index: i64,
}

impl TextElement {
    /// A new note with the default content, style, and position.
    #[must_use]
    pub fn new(id: TextId, content: impl Into<String>, x: f64, y: f64, z_index: i64) -> Self {
        Self {
            id,
            content: content.into(),
            x,
            y,
            is_editing: false,
            is_selected: false,
            color: DEFAULT_TEXT_COLOR.to_owned(),
            font_size: DEFAULT_FONT_SIZE,
            z_index,
        }
    }

    /// Apply a sparse edit. Returns false when nothing changed.
    pub fn apply(&mut self, edit: &TextEdit) -> bool {
        let mut changed = false;
        if let Some(ref content) = edit.content {
            changed |= *content != self.content;
            self.content.clone_from(content);
        }
        if let Some(ref color) = edit.color {
            changed |= *color != self.color;
            self.color.clone_from(color);
        }
        if let Some(size) = edit.font_size {
            let size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
            changed |= size != self.font_size;
            self.font_size = size;
        }
        changed
    }
}

/// Sparse update for a text note. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Clamped to the allowed font size range when applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// Full persisted snapshot of a scene: the save/load round-trip artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub texts: Vec<TextElement>,
    pub cards: Vec<Card>,
    pub zoom: f64,
}

impl Document {
    /// Parse and validate a document.
    ///
    /// # Errors
    ///
    /// Returns `Json` if required fields are missing or have the wrong shape,
    /// `DuplicateCardKey` / `DuplicateTextId` if identities collide, and
    /// `MultipleEditing` if more than one note is in edit mode.
    pub fn from_json(text: &str) -> Result<Self, DocError> {
        let doc: Self = serde_json::from_str(text)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Serialize as indented JSON, the form offered for download.
    ///
    /// # Errors
    ///
    /// Returns `Json` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, DocError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check identity uniqueness across cards and across notes, and that at
    /// most one note is in edit mode.
    ///
    /// # Errors
    ///
    /// Returns the first duplicated card key or text id found, or
    /// `MultipleEditing` if several notes claim edit mode.
    pub fn validate(&self) -> Result<(), DocError> {
        let mut keys = HashSet::with_capacity(self.cards.len());
        for card in &self.cards {
            if !keys.insert(card.key.as_str()) {
                return Err(DocError::DuplicateCardKey(card.key.clone()));
            }
        }
        let mut ids = HashSet::with_capacity(self.texts.len());
        for text in &self.texts {
            if !ids.insert(text.id) {
                return Err(DocError::DuplicateTextId(text.id));
            }
        }
        let editing = self.texts.iter().filter(|t| t.is_editing).count();
        if editing > 1 {
            return Err(DocError::MultipleEditing(editing));
        }
        Ok(())
    }
}

// =============================================================================
// CONTENT SOURCE
// =============================================================================

/// Content-source data: card fields keyed by card identifier, in source order.
///
/// Source order matters: ingestion seeds z-indices from it and reload places
/// new cards on a grid by it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRecords {
    entries: Vec<(String, CardFields)>,
}

impl SourceRecords {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ordered `(key, fields)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSourceKey` if a key repeats.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, DocError>
    where
        I: IntoIterator<Item = (K, CardFields)>,
        K: Into<String>,
    {
        let mut records = Self::new();
        for (key, fields) in pairs {
            records.push(key, fields)?;
        }
        Ok(records)
    }

    /// Append a record at the end of the source order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSourceKey` if the key is already present.
    pub fn push(&mut self, key: impl Into<String>, fields: CardFields) -> Result<(), DocError> {
        let key = key.into();
        if self.get(&key).is_some() {
            return Err(DocError::DuplicateSourceKey(key));
        }
        self.entries.push((key, fields));
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CardFields> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CardFields)> {
        self.entries.iter().map(|(k, f)| (k.as_str(), f))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_color() -> String {
    DEFAULT_TEXT_COLOR.to_owned()
}

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

fn color_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|c| !c.is_empty())
        .unwrap_or_else(default_color))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn font_size_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let size = Option::<f64>::deserialize(deserializer)?;
    match size {
        Some(s) if s.is_finite() && s >= 1.0 => Ok(s.round().min(f64::from(u32::MAX)) as u32),
        _ => Ok(DEFAULT_FONT_SIZE),
    }
}

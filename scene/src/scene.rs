//! The scene aggregate: title, cards, text notes, zoom, and stacking counter.
//!
//! DESIGN
//! ======
//! Whole-scene transitions (document load, fresh ingestion, reload-merge) are
//! constructors that build a complete new `Scene` off to the side. Callers
//! swap it in only once it exists, so a failed load never leaves a partially
//! applied scene behind.
//!
//! Per-element transitions (front-raise, selection, edits, moves, removal)
//! mutate in place and report whether anything changed. Every path that hands
//! out a z-index goes through [`ZOrder`], which keeps `max_z_index` at or
//! above every live element.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::camera::{Point, Zoom};
use crate::consts::{
    GRID_COLUMNS, GRID_MARGIN, GRID_PITCH, INGESTED_TITLE, INITIAL_TITLE, NEW_TEXT_CONTENT, NEW_TEXT_POS,
    SCATTER_OFFSET, SCATTER_SPAN,
};
use crate::doc::{Card, DocError, Document, SourceRecords, TextEdit, TextElement, TextId};
use crate::input::ElementRef;
use crate::zorder::ZOrder;

/// Counts from a reload-merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Existing cards whose content fields were refreshed.
    pub updated: usize,
    /// Cards seen for the first time.
    pub added: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    title: String,
    cards: Vec<Card>,
    texts: Vec<TextElement>,
    zoom: Zoom,
    z: ZOrder,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            title: INITIAL_TITLE.to_owned(),
            cards: Vec::new(),
            texts: Vec::new(),
            zoom: Zoom::default(),
            z: ZOrder::default(),
        }
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // WHOLE-SCENE CONSTRUCTORS
    // =========================================================================

    /// Build a scene from a saved document.
    ///
    /// Zoom is clamped into range and the stacking counter is recomputed from
    /// the loaded elements. A note in edit mode is loaded as selected too.
    ///
    /// # Errors
    ///
    /// Returns a `DocError` if card keys or text ids collide, or if more than
    /// one note is in edit mode.
    pub fn from_document(mut doc: Document) -> Result<Self, DocError> {
        doc.validate()?;
        for text in doc.texts.iter_mut().filter(|t| t.is_editing) {
            text.is_selected = true;
        }
        let z = ZOrder::recompute(&doc.cards, &doc.texts);
        Ok(Self { title: doc.title, cards: doc.cards, texts: doc.texts, zoom: Zoom::new(doc.zoom), z })
    }

    /// Build a brand-new scene from content-source records.
    ///
    /// Cards are scattered at random inside the ingestion square and stacked
    /// `1..=N` in source order. Notes, title, and zoom start over.
    pub fn ingest<R: Rng + ?Sized>(records: &SourceRecords, rng: &mut R) -> Self {
        let mut z = ZOrder::default();
        let cards = records
            .iter()
            .map(|(key, fields)| {
                let x = f64::from(rng.random_range(0..SCATTER_SPAN)) + SCATTER_OFFSET;
                let y = f64::from(rng.random_range(0..SCATTER_SPAN)) + SCATTER_OFFSET;
                Card::new(key, fields.clone(), x, y, z.next())
            })
            .collect();

        Self {
            title: INGESTED_TITLE.to_owned(),
            cards,
            texts: Vec::new(),
            zoom: Zoom::default(),
            z,
        }
    }

    /// Reconcile the live cards against refreshed content-source records.
    ///
    /// Cards whose key is in `records` get their content fields replaced and
    /// keep position and z-index. Keys seen for the first time become new
    /// cards on a grid, stacked above everything already present, in source
    /// order. Cards missing from `records` are kept: merge never removes.
    #[must_use]
    pub fn merged(&self, records: &SourceRecords) -> (Self, MergeSummary) {
        let mut next = self.clone();
        let mut summary = MergeSummary::default();
        let index: HashMap<String, usize> =
            next.cards.iter().enumerate().map(|(i, c)| (c.key.clone(), i)).collect();
        let base = self.z.max();

        for (key, fields) in records.iter() {
            if let Some(&i) = index.get(key) {
                next.cards[i].fields = fields.clone();
                summary.updated += 1;
                continue;
            }

            let ordinal = summary.added;
            let (x, y) = grid_position(ordinal);
            let offset = i64::try_from(ordinal).unwrap_or(i64::MAX);
            let z_index = base.saturating_add(offset).saturating_add(1);
            next.cards.push(Card::new(key, fields.clone(), x, y, z_index));
            summary.added += 1;
        }

        if let Some(highest) = next.cards.iter().map(|c| c.z_index).max() {
            next.z.observe(highest);
        }
        (next, summary)
    }

    /// Snapshot the scene as a document. UI flags on notes are kept as-is.
    #[must_use]
    pub fn to_document(&self) -> Document {
        Document {
            title: self.title.clone(),
            texts: self.texts.clone(),
            cards: self.cards.clone(),
            zoom: self.zoom.factor(),
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn texts(&self) -> &[TextElement] {
        &self.texts
    }

    #[must_use]
    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    #[must_use]
    pub fn max_z_index(&self) -> i64 {
        self.z.max()
    }

    #[must_use]
    pub fn card(&self, key: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.key == key)
    }

    #[must_use]
    pub fn text(&self, id: TextId) -> Option<&TextElement> {
        self.texts.iter().find(|t| t.id == id)
    }

    /// The note currently in edit mode, if any.
    #[must_use]
    pub fn editing_text(&self) -> Option<TextId> {
        self.texts.iter().find(|t| t.is_editing).map(|t| t.id)
    }

    /// Whether an element with this identity is on the board.
    #[must_use]
    pub fn contains(&self, element: &ElementRef) -> bool {
        self.position(element).is_some()
    }

    /// Scene-space position of an element.
    #[must_use]
    pub fn position(&self, element: &ElementRef) -> Option<Point> {
        match element {
            ElementRef::Card { key } => self.card(key).map(|c| Point::new(c.x, c.y)),
            ElementRef::Text { id } => self.text(*id).map(|t| Point::new(t.x, t.y)),
        }
    }

    // =========================================================================
    // SCENE-LEVEL EDITS
    // =========================================================================

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.zoom = zoom;
    }

    // =========================================================================
    // ELEMENT EDITS
    // =========================================================================

    /// Add a default note on top of everything and return its id.
    ///
    /// `now_ms` seeds the id; it is bumped past the largest live id so two
    /// notes added within the same millisecond stay distinct.
    pub fn add_text(&mut self, now_ms: u64) -> TextId {
        let id = self.next_text_id(now_ms);
        let (x, y) = NEW_TEXT_POS;
        let z_index = self.z.next();
        self.texts.push(TextElement::new(id, NEW_TEXT_CONTENT, x, y, z_index));
        id
    }

    /// Apply a sparse edit to a note. Returns `None` if the note is unknown.
    pub fn edit_text(&mut self, id: TextId, edit: &TextEdit) -> Option<bool> {
        self.text_mut(id).map(|t| t.apply(edit))
    }

    /// Write a new scene-space position onto an element.
    pub fn move_to(&mut self, element: &ElementRef, pos: Point) -> bool {
        match element {
            ElementRef::Card { key } => {
                let Some(card) = self.cards.iter_mut().find(|c| c.key == *key) else {
                    return false;
                };
                card.x = pos.x;
                card.y = pos.y;
            }
            ElementRef::Text { id } => {
                let Some(text) = self.text_mut(*id) else {
                    return false;
                };
                text.x = pos.x;
                text.y = pos.y;
            }
        }
        true
    }

    /// Remove an element regardless of its interaction state.
    pub fn remove(&mut self, element: &ElementRef) -> bool {
        let before = self.cards.len() + self.texts.len();
        match element {
            ElementRef::Card { key } => self.cards.retain(|c| c.key != *key),
            ElementRef::Text { id } => self.texts.retain(|t| t.id != *id),
        }
        self.cards.len() + self.texts.len() != before
    }

    // =========================================================================
    // SELECTION TRANSITIONS
    // =========================================================================

    /// Card activation: every note goes idle and the card is raised to the front.
    ///
    /// Returns `None` if the card is unknown, otherwise whether the card's
    /// z-index changed.
    pub fn activate_card(&mut self, key: &str) -> Option<bool> {
        let i = self.cards.iter().position(|c| c.key == key)?;
        self.clear_text_selection();
        let raised = self.z.bring_to_front(self.cards[i].z_index);
        if let Some(z_index) = raised {
            self.cards[i].z_index = z_index;
        }
        Some(raised.is_some())
    }

    /// Single click on a note: it becomes selected and every other note idle.
    ///
    /// A note below the top of the stack is raised; the topmost note is left
    /// where it is. A note already in edit mode stays in edit mode.
    pub fn select_text(&mut self, id: TextId) -> bool {
        let Some(i) = self.texts.iter().position(|t| t.id == id) else {
            return false;
        };
        if let Some(z_index) = self.z.bring_to_front(self.texts[i].z_index) {
            self.texts[i].z_index = z_index;
        }
        for text in &mut self.texts {
            if text.id == id {
                text.is_selected = true;
            } else {
                text.is_selected = false;
                text.is_editing = false;
            }
        }
        true
    }

    /// Double click on a note: it enters edit mode; every other note goes idle.
    pub fn begin_edit(&mut self, id: TextId) -> bool {
        if self.text(id).is_none() {
            return false;
        }
        for text in &mut self.texts {
            let this = text.id == id;
            text.is_editing = this;
            text.is_selected = this;
        }
        true
    }

    /// Leave edit mode (blur or Enter); the note stays selected.
    pub fn commit_edit(&mut self, id: TextId) -> bool {
        let Some(text) = self.text_mut(id) else {
            return false;
        };
        text.is_editing = false;
        text.is_selected = true;
        true
    }

    /// Every note returns to idle. Returns whether any flag changed.
    pub fn clear_text_selection(&mut self) -> bool {
        let mut changed = false;
        for text in &mut self.texts {
            changed |= text.is_selected || text.is_editing;
            text.is_selected = false;
            text.is_editing = false;
        }
        changed
    }

    /// A note id no live note holds: `now_ms` or the one after the largest
    /// live id, whichever is higher. Once the largest id is `TextId::MAX`
    /// the lowest free id is used instead.
    fn next_text_id(&self, now_ms: u64) -> TextId {
        let Some(highest) = self.texts.iter().map(|t| t.id).max() else {
            return now_ms;
        };
        if let Some(next) = highest.checked_add(1) {
            return now_ms.max(next);
        }
        let taken: HashSet<TextId> = self.texts.iter().map(|t| t.id).collect();
        (0..=TextId::MAX).find(|id| !taken.contains(id)).unwrap_or(now_ms)
    }

    fn text_mut(&mut self, id: TextId) -> Option<&mut TextElement> {
        self.texts.iter_mut().find(|t| t.id == id)
    }
}

/// Grid cell for the `ordinal`-th card first seen during a reload.
#[allow(clippy::cast_precision_loss)]
fn grid_position(ordinal: usize) -> (f64, f64) {
    let col = (ordinal % GRID_COLUMNS) as f64;
    let row = (ordinal / GRID_COLUMNS) as f64;
    (col * GRID_PITCH + GRID_MARGIN, row * GRID_PITCH + GRID_MARGIN)
}

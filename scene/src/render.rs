//! Renderer-facing view: the board as a flat list of positioned, layered elements.
//!
//! This module reads a [`Scene`] and produces plain serializable values. It
//! never mutates state. Draw order is ascending z-index; elements sharing a
//! z-index keep scene order, cards before notes.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::doc::{Card, TextElement, TextId};
use crate::input::TextState;
use crate::scene::Scene;

/// An external link shown on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub href: String,
}

/// Everything a card shows, on the board and in the detail panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub key: String,
    pub title: String,
    pub tags: Vec<String>,
    pub links: Vec<Link>,
    pub notes: String,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            key: card.key.clone(),
            title: card.fields.title.clone(),
            tags: card.fields.tags.clone(),
            links: card
                .links()
                .into_iter()
                .map(|(label, href)| Link { label, href: href.to_owned() })
                .collect(),
            notes: card.fields.notes.clone(),
        }
    }
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextView {
    pub id: TextId,
    pub content: String,
    pub color: String,
    pub font_size: u32,
    pub state: TextState,
    /// Style controls are shown for a selected note that is not being edited.
    pub show_controls: bool,
    /// The delete affordance is shown on any selected note.
    pub show_delete: bool,
    /// Selected notes can be dragged.
    pub draggable: bool,
}

impl From<&TextElement> for TextView {
    fn from(text: &TextElement) -> Self {
        let state = TextState::of(text);
        Self {
            id: text.id,
            content: text.content.clone(),
            color: text.color.clone(),
            font_size: text.font_size,
            state,
            show_controls: state == TextState::Selected,
            show_delete: state != TextState::Idle,
            draggable: state.is_draggable(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayerContent {
    Card(CardView),
    Text(TextView),
}

/// One positioned element in draw order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub x: f64,
    pub y: f64,
    pub z_index: i64,
    #[serde(flatten)]
    pub content: LayerContent,
}

/// All elements of `scene`, bottom first.
#[must_use]
pub fn layers(scene: &Scene) -> Vec<Layer> {
    let cards = scene.cards().iter().map(|c| Layer {
        x: c.x,
        y: c.y,
        z_index: c.z_index,
        content: LayerContent::Card(CardView::from(c)),
    });
    let texts = scene.texts().iter().map(|t| Layer {
        x: t.x,
        y: t.y,
        z_index: t.z_index,
        content: LayerContent::Text(TextView::from(t)),
    });
    let mut out: Vec<Layer> = cards.chain(texts).collect();
    out.sort_by_key(|l| l.z_index);
    out
}

/// Detail panel content for the card with `key`, read from the live scene.
#[must_use]
pub fn detail(scene: &Scene, key: &str) -> Option<CardView> {
    scene.card(key).map(CardView::from)
}

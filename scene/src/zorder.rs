//! Stacking priority: the high-water mark of every z-index handed out.
//!
//! `ZOrder::max` only moves forward during interaction. It is reset wholesale
//! when a scene is rebuilt from a document or a fresh content source.

#[cfg(test)]
#[path = "zorder_test.rs"]
mod zorder_test;

use crate::doc::{Card, TextElement};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZOrder {
    max: i64,
}

impl ZOrder {
    #[must_use]
    pub fn new(max: i64) -> Self {
        Self { max }
    }

    /// Recompute the counter for a freshly loaded element set.
    ///
    /// The element count is a floor so that a document whose z-indices are
    /// all zero still leaves headroom above every element.
    #[must_use]
    pub fn recompute(cards: &[Card], texts: &[TextElement]) -> Self {
        let highest = cards
            .iter()
            .map(|c| c.z_index)
            .chain(texts.iter().map(|t| t.z_index))
            .max()
            .unwrap_or(0);
        let count = i64::try_from(cards.len() + texts.len()).unwrap_or(i64::MAX);
        Self { max: highest.max(count).max(0) }
    }

    /// Current high-water mark.
    #[must_use]
    pub fn max(self) -> i64 {
        self.max
    }

    /// Allocate the z-index for a newly created element.
    pub fn next(&mut self) -> i64 {
        self.max += 1;
        self.max
    }

    /// Raise an element currently at `current` above everything else.
    ///
    /// Returns the new z-index, or `None` when the element is already topmost.
    pub fn bring_to_front(&mut self, current: i64) -> Option<i64> {
        if current >= self.max {
            return None;
        }
        Some(self.next())
    }

    /// Advance the counter to `z` if it is higher.
    pub fn observe(&mut self, z: i64) {
        self.max = self.max.max(z);
    }
}

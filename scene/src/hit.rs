#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::consts::{CARD_HEIGHT, CARD_WIDTH, TEXT_MIN_HEIGHT, TEXT_MIN_WIDTH};
use crate::input::Target;
use crate::scene::Scene;

/// Find the topmost element whose footprint contains `scene_pt`.
///
/// Notes are tested against their minimum footprint. On equal z-index the
/// later-drawn element wins: notes draw after cards, later entries after
/// earlier ones. A miss is the background.
#[must_use]
pub fn hit_test(scene: &Scene, scene_pt: Point) -> Target {
    let cards = scene
        .cards()
        .iter()
        .filter(|c| contains(c.x, c.y, CARD_WIDTH, CARD_HEIGHT, scene_pt))
        .map(|c| (c.z_index, Target::Card { key: c.key.clone() }));
    let texts = scene
        .texts()
        .iter()
        .filter(|t| contains(t.x, t.y, TEXT_MIN_WIDTH, TEXT_MIN_HEIGHT, scene_pt))
        .map(|t| (t.z_index, Target::Text { id: t.id }));

    // max_by_key returns the last maximum, which is the later-drawn element.
    cards
        .chain(texts)
        .max_by_key(|(z, _)| *z)
        .map_or(Target::Background, |(_, target)| target)
}

fn contains(x: f64, y: f64, w: f64, h: f64, pt: Point) -> bool {
    pt.x >= x && pt.x <= x + w && pt.y >= y && pt.y <= y + h
}

#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::doc::CardFields;

fn fields(title: &str) -> CardFields {
    CardFields { title: title.into(), ..Default::default() }
}

fn scene(cards: Vec<Card>, texts: Vec<TextElement>) -> Scene {
    Scene::from_document(Document { title: "t".into(), texts, cards, zoom: 1.0 }).unwrap()
}

#[test]
fn default_scene() {
    let s = Scene::new();
    assert_eq!(s.title(), "Title");
    assert_eq!(s.max_z_index(), 0);
    assert!(s.editing_text().is_none());
}

#[test]
fn ingest_preserves_source_order_and_fields() {
    let records = SourceRecords::from_pairs([("b", fields("B")), ("a", fields("A"))]).unwrap();
    let s = Scene::ingest(&records, &mut StdRng::seed_from_u64(1));
    let keys: Vec<&str> = s.cards().iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["b", "a"]);
    assert_eq!(s.card("a").unwrap().fields.title, "A");
    assert_eq!(s.card("a").unwrap().z_index, 2);
}

#[test]
fn ingest_of_empty_source_is_empty_scene() {
    let s = Scene::ingest(&SourceRecords::new(), &mut StdRng::seed_from_u64(1));
    assert!(s.cards().is_empty());
    assert_eq!(s.max_z_index(), 0);
    assert_eq!(s.title(), "New Table");
}

#[test]
fn merged_leaves_original_untouched() {
    let original = scene(vec![Card::new("A", fields("a"), 1.0, 2.0, 1)], vec![]);
    let records = SourceRecords::from_pairs([("A", fields("changed")), ("B", fields("b"))]).unwrap();
    let (next, summary) = original.merged(&records);
    assert_eq!(original.card("A").unwrap().fields.title, "a");
    assert!(original.card("B").is_none());
    assert_eq!(next.card("A").unwrap().fields.title, "changed");
    assert_eq!(summary, MergeSummary { updated: 1, added: 1 });
}

#[test]
fn merged_keeps_notes_title_and_zoom() {
    let mut original = scene(vec![], vec![TextElement::new(1, "n", 0.0, 0.0, 1)]);
    original.set_zoom(Zoom::new(1.5));
    original.set_title("kept");
    let (next, _) = original.merged(&SourceRecords::from_pairs([("A", fields("a"))]).unwrap());
    assert_eq!(next.texts().len(), 1);
    assert_eq!(next.title(), "kept");
    assert_eq!(next.zoom().factor(), 1.5);
}

#[test]
fn add_text_bumps_id_past_live_ids() {
    let mut s = scene(vec![], vec![TextElement::new(500, "n", 0.0, 0.0, 1)]);
    assert_eq!(s.add_text(100), 501);
    assert_eq!(s.add_text(1000), 1000);
    assert_eq!(s.add_text(1000), 1001);
}

#[test]
fn add_text_finds_free_id_when_largest_is_max() {
    let mut s = scene(
        vec![],
        vec![TextElement::new(u64::MAX, "top", 0.0, 0.0, 1), TextElement::new(0, "zero", 0.0, 0.0, 2)],
    );
    let id = s.add_text(1_700_000_000_000);
    assert_eq!(id, 1);
    assert_eq!(s.texts().iter().filter(|t| t.id == u64::MAX).count(), 1);
    assert_eq!(s.texts().len(), 3);

    assert!(s.remove(&ElementRef::Text { id: u64::MAX }));
    assert_eq!(s.texts().len(), 2);
}

#[test]
fn editing_note_loads_as_selected() {
    let mut editing = TextElement::new(1, "e", 0.0, 0.0, 1);
    editing.is_editing = true;
    let s = scene(vec![], vec![editing]);
    let text = s.text(1).unwrap();
    assert!(text.is_editing);
    assert!(text.is_selected);
}

#[test]
fn move_to_unknown_element_fails() {
    let mut s = Scene::new();
    assert!(!s.move_to(&ElementRef::Card { key: "x".into() }, Point::new(1.0, 1.0)));
}

#[test]
fn position_reads_element_coordinates() {
    let s = scene(vec![Card::new("A", fields("a"), 3.0, 4.0, 1)], vec![]);
    assert_eq!(s.position(&ElementRef::Card { key: "A".into() }), Some(Point::new(3.0, 4.0)));
    assert!(s.contains(&ElementRef::Card { key: "A".into() }));
    assert!(!s.contains(&ElementRef::Text { id: 1 }));
}

#[test]
fn activate_unknown_card_is_none() {
    let mut s = Scene::new();
    assert_eq!(s.activate_card("nope"), None);
}

#[test]
fn select_text_keeps_own_edit_mode() {
    let mut s = scene(vec![], vec![TextElement::new(1, "n", 0.0, 0.0, 1)]);
    s.begin_edit(1);
    s.select_text(1);
    assert_eq!(s.editing_text(), Some(1));
}

#[test]
fn select_text_stops_other_edit() {
    let mut s = scene(vec![], vec![TextElement::new(1, "n", 0.0, 0.0, 1), TextElement::new(2, "m", 0.0, 0.0, 2)]);
    s.begin_edit(1);
    s.select_text(2);
    assert_eq!(s.editing_text(), None);
    assert!(!s.text(1).unwrap().is_selected);
}

#[test]
fn clear_text_selection_reports_change() {
    let mut s = scene(vec![], vec![TextElement::new(1, "n", 0.0, 0.0, 1)]);
    assert!(!s.clear_text_selection());
    s.select_text(1);
    assert!(s.clear_text_selection());
}

#[test]
fn commit_unknown_text_fails() {
    let mut s = Scene::new();
    assert!(!s.commit_edit(3));
    assert!(!s.begin_edit(3));
    assert!(!s.select_text(3));
}

#[test]
fn remove_reports_whether_anything_went() {
    let mut s = scene(vec![Card::new("A", fields("a"), 0.0, 0.0, 1)], vec![]);
    assert!(s.remove(&ElementRef::Card { key: "A".into() }));
    assert!(!s.remove(&ElementRef::Card { key: "A".into() }));
}

#[test]
fn grid_wraps_after_five_columns() {
    assert_eq!(grid_position(0), (10.0, 10.0));
    assert_eq!(grid_position(3), (370.0, 10.0));
    assert_eq!(grid_position(10), (10.0, 250.0));
}

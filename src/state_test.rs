use super::*;
use scene::engine::Mode;

fn config(mode: Mode) -> Config {
    Config {
        port: 0,
        mode,
        table_location: "./table_data.json".into(),
        cards_location: None,
    }
}

#[test]
fn load_tickets_increase() {
    let loads = LoadSequence::default();
    let first = loads.begin();
    let second = loads.begin();
    assert!(second > first);
}

#[test]
fn only_latest_ticket_is_current() {
    let loads = LoadSequence::default();
    let first = loads.begin();
    assert!(loads.is_current(first));
    let second = loads.begin();
    assert!(!loads.is_current(first));
    assert!(loads.is_current(second));
}

#[test]
fn clones_share_the_sequence() {
    let loads = LoadSequence::default();
    let other = loads.clone();
    let first = loads.begin();
    let _second = other.begin();
    assert!(!loads.is_current(first));
}

#[tokio::test]
async fn new_board_starts_in_configured_mode() {
    let state = AppState::new(config(Mode::ContentSource));
    assert_eq!(state.board.read().await.mode(), Mode::ContentSource);
    assert!(state.board.read().await.scene().cards().is_empty());
}

#[tokio::test]
async fn clones_share_the_board() {
    let state = AppState::new(config(Mode::Document));
    let other = state.clone();
    other.board.write().await.set_title("Shared");
    assert_eq!(state.board.read().await.scene().title(), "Shared");
}

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::{Card, DocError, Document, SourceRecords, TextEdit, TextId};
use crate::hit;
use crate::input::{Button, DraggedItem, ElementRef, InputEvent, Key, Modifiers, Target, TextState, WheelDelta};
use crate::scene::{MergeSummary, Scene};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// How the board was started, chosen by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Built fresh from a content source; no reload.
    ContentSource,
    /// Loaded from a document; reload-merge from the content source is available.
    #[default]
    Document,
    /// Rebuilt from a user-supplied content source after a confirmed reset.
    Reset,
}

impl Mode {
    /// Whether reload-merge is permitted in this mode.
    #[must_use]
    pub fn allows_reload(self) -> bool {
        matches!(self, Self::Document)
    }
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    RenderNeeded,
    /// The card shown in the detail panel changed.
    DetailChanged { key: Option<String> },
    /// A note entered edit mode; the host should focus its inline editor.
    EditTextRequested { id: TextId },
}

/// Result of a reload-merge request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Applied(MergeSummary),
    /// The current mode does not permit reload; nothing changed.
    NotPermitted,
}

/// The interaction controller: owns the scene and all transient UI state.
///
/// The drag record holds only an element identity plus its pre-drag position;
/// the scene stays the single owner of every element.
#[derive(Debug, Clone, Default)]
pub struct Board {
    scene: Scene,
    mode: Mode,
    selected_card: Option<String>,
    drag: Option<DraggedItem>,
    pending_removal: Option<ElementRef>,
}

impl Board {
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self { mode, ..Self::default() }
    }

    // --- Queries ---

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The card shown in the detail panel, read live from the scene.
    #[must_use]
    pub fn selected_card(&self) -> Option<&Card> {
        self.selected_card.as_deref().and_then(|key| self.scene.card(key))
    }

    /// The active drag gesture, if any.
    #[must_use]
    pub fn drag(&self) -> Option<&DraggedItem> {
        self.drag.as_ref()
    }

    /// The element awaiting removal confirmation, if any.
    #[must_use]
    pub fn pending_removal(&self) -> Option<&ElementRef> {
        self.pending_removal.as_ref()
    }

    // --- Event dispatch ---

    /// Route one surface event to its handler.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::PointerDown { at, button, target } => self.on_pointer_down(at, button, target),
            InputEvent::PointerMove { at } => self.on_pointer_move(at),
            InputEvent::PointerUp => self.on_pointer_up(),
            InputEvent::PointerLeave => self.on_pointer_leave(),
            InputEvent::Click { at, target } => match self.resolve(at, target) {
                Some(target) => self.on_click(&target),
                None => Vec::new(),
            },
            InputEvent::DoubleClick { at, target } => match self.resolve(at, target) {
                Some(target) => self.on_double_click(&target),
                None => Vec::new(),
            },
            InputEvent::Wheel { delta, modifiers } => self.on_wheel(delta, modifiers),
            InputEvent::KeyDown { key } => self.on_key_down(&key),
            InputEvent::Blur { id } => self.commit_text(id),
        }
    }

    fn resolve(&self, at: Option<Point>, target: Option<Target>) -> Option<Target> {
        target.or_else(|| at.map(|p| hit::hit_test(&self.scene, self.scene.zoom().screen_to_scene(p))))
    }

    // --- Drag controller ---

    /// Start a drag on primary press.
    ///
    /// Cards are activated and picked up immediately. Notes can only be picked
    /// up once selected, so moving a note is always click, then drag.
    pub fn on_pointer_down(&mut self, at: Point, button: Button, target: Option<Target>) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let Some(target) = self.resolve(Some(at), target) else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        let element = match target {
            Target::Background => return actions,
            Target::Card { key } => {
                if self.scene.card(&key).is_none() {
                    return actions;
                }
                actions = self.activate_card(&key);
                ElementRef::Card { key }
            }
            Target::Text { id } => {
                let draggable = self.scene.text(id).is_some_and(|t| TextState::of(t).is_draggable());
                if !draggable {
                    return actions;
                }
                ElementRef::Text { id }
            }
        };
        if let Some(start_pos) = self.scene.position(&element) {
            self.drag = Some(DraggedItem { element, start_pointer: at, start_pos });
        }
        actions
    }

    /// Move the dragged element to its pick-up position plus the zoom-corrected
    /// pointer displacement. No-op without an active drag.
    pub fn on_pointer_move(&mut self, at: Point) -> Vec<Action> {
        let Some(ref drag) = self.drag else {
            return Vec::new();
        };
        let delta = self.scene.zoom().screen_delta_to_scene(drag.start_pointer, at);
        let pos = Point::new(drag.start_pos.x + delta.x, drag.start_pos.y + delta.y);
        let element = drag.element.clone();
        if !self.scene.move_to(&element, pos) {
            self.drag = None;
            return Vec::new();
        }
        vec![Action::RenderNeeded]
    }

    /// Release commits wherever the element is; there is no revert.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.drag = None;
        Vec::new()
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.on_pointer_up()
    }

    // --- Selection ---

    pub fn on_click(&mut self, target: &Target) -> Vec<Action> {
        match target {
            Target::Card { key } => self.activate_card(key),
            Target::Text { id } => {
                if self.scene.select_text(*id) {
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            Target::Background => {
                self.scene.clear_text_selection();
                let mut actions = vec![Action::RenderNeeded];
                if self.selected_card.take().is_some() {
                    actions.push(Action::DetailChanged { key: None });
                }
                actions
            }
        }
    }

    pub fn on_double_click(&mut self, target: &Target) -> Vec<Action> {
        let Target::Text { id } = *target else {
            return Vec::new();
        };
        if !self.scene.begin_edit(id) {
            return Vec::new();
        }
        vec![Action::RenderNeeded, Action::EditTextRequested { id }]
    }

    /// Enter commits the note being edited.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if !key.is_enter() {
            return Vec::new();
        }
        match self.scene.editing_text() {
            Some(id) => self.commit_text(id),
            None => Vec::new(),
        }
    }

    /// Leave edit mode on a note, keeping it selected.
    pub fn commit_text(&mut self, id: TextId) -> Vec<Action> {
        if self.scene.commit_edit(id) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Close the detail panel without touching note selection.
    pub fn deselect_card(&mut self) -> Vec<Action> {
        if self.selected_card.take().is_some() {
            vec![Action::DetailChanged { key: None }]
        } else {
            Vec::new()
        }
    }

    fn activate_card(&mut self, key: &str) -> Vec<Action> {
        if self.scene.activate_card(key).is_none() {
            return Vec::new();
        }
        let mut actions = vec![Action::RenderNeeded];
        if self.selected_card.as_deref() != Some(key) {
            self.selected_card = Some(key.to_owned());
            actions.push(Action::DetailChanged { key: Some(key.to_owned()) });
        }
        actions
    }

    // --- Zoom ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.scene.set_zoom(self.scene.zoom().zoom_in());
        vec![Action::RenderNeeded]
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.scene.set_zoom(self.scene.zoom().zoom_out());
        vec![Action::RenderNeeded]
    }

    /// Wheel zooms only while Ctrl is held; plain scrolling is left to the host.
    pub fn on_wheel(&mut self, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if !modifiers.ctrl {
            return Vec::new();
        }
        self.scene.set_zoom(self.scene.zoom().wheel(delta.dy));
        vec![Action::RenderNeeded]
    }

    // --- Element edits ---

    /// Add a default note stamped with the current time.
    pub fn add_text(&mut self) -> TextId {
        self.scene.add_text(now_ms())
    }

    /// Apply a sparse style/content edit. Returns `None` for an unknown note.
    pub fn edit_text(&mut self, id: TextId, edit: &TextEdit) -> Option<bool> {
        self.scene.edit_text(id, edit)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.scene.set_title(title);
    }

    // --- Removal ---

    /// Ask to remove an element. Nothing happens until confirmed.
    pub fn request_removal(&mut self, element: ElementRef) -> bool {
        if !self.scene.contains(&element) {
            return false;
        }
        self.pending_removal = Some(element);
        true
    }

    /// Remove the element awaiting confirmation. Returns the removed identity.
    pub fn confirm_removal(&mut self) -> Option<ElementRef> {
        let element = self.pending_removal.take()?;
        self.remove(&element).then_some(element)
    }

    pub fn cancel_removal(&mut self) {
        self.pending_removal = None;
    }

    /// Remove an element outright, whatever its state.
    pub fn remove(&mut self, element: &ElementRef) -> bool {
        if !self.scene.remove(element) {
            return false;
        }
        if let ElementRef::Card { key } = element {
            if self.selected_card.as_deref() == Some(key.as_str()) {
                self.selected_card = None;
            }
        }
        if self.drag.as_ref().is_some_and(|d| d.element == *element) {
            self.drag = None;
        }
        if self.pending_removal.as_ref() == Some(element) {
            self.pending_removal = None;
        }
        true
    }

    // --- Whole-scene loads ---

    /// Replace the scene with a saved document.
    ///
    /// # Errors
    ///
    /// Returns a `DocError` if the document fails validation; the current
    /// scene is left untouched.
    pub fn load_document(&mut self, doc: Document) -> Result<(), DocError> {
        let scene = Scene::from_document(doc)?;
        self.replace_scene(scene);
        Ok(())
    }

    /// Replace the scene with a fresh ingestion of `records`.
    pub fn ingest<R: Rng + ?Sized>(&mut self, records: &SourceRecords, rng: &mut R) {
        self.replace_scene(Scene::ingest(records, rng));
        self.selected_card = None;
    }

    /// Confirmed reset: ingest a user-supplied source and leave document mode.
    pub fn reset_with_source<R: Rng + ?Sized>(&mut self, records: &SourceRecords, rng: &mut R) {
        self.ingest(records, rng);
        self.mode = Mode::Reset;
    }

    /// Update-only reconciliation against refreshed content-source records.
    pub fn merge_reload(&mut self, records: &SourceRecords) -> MergeOutcome {
        if !self.mode.allows_reload() {
            return MergeOutcome::NotPermitted;
        }
        let (scene, summary) = self.scene.merged(records);
        self.scene = scene;
        MergeOutcome::Applied(summary)
    }

    /// Snapshot for saving.
    #[must_use]
    pub fn serialize_document(&self) -> Document {
        self.scene.to_document()
    }

    fn replace_scene(&mut self, scene: Scene) {
        self.scene = scene;
        self.drag = None;
        self.pending_removal = None;
        if self.selected_card.as_deref().is_some_and(|key| self.scene.card(key).is_none()) {
            self.selected_card = None;
        }
    }
}

fn now_ms() -> u64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    u64::try_from(dur.as_millis()).unwrap_or(u64::MAX)
}

//=========================================================================
// State Tracker
//=========================================================================
//
// Live keyboard/mouse state: what is held right now, plus the per-frame
// transitions that happened during the current frame.
//
// Frame lifecycle: begin_frame() → process_events() → end_frame() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::hash::Hash;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== HeldSet =============================================================

/// Held inputs of one kind, with the frame's press/release transitions.
#[derive(Debug)]
struct HeldSet<T: Copy + Eq + Hash> {
    held: HashSet<T>,
    pressed: HashSet<T>,
    released: HashSet<T>,
}

impl<T: Copy + Eq + Hash> HeldSet<T> {
    fn new() -> Self {
        Self {
            held: HashSet::new(),
            pressed: HashSet::new(),
            released: HashSet::new(),
        }
    }

    // Repeated downs (OS key repeat) are not new presses
    fn down(&mut self, input: T) {
        if self.held.insert(input) {
            self.pressed.insert(input);
        }
    }

    // Spurious ups for inputs never seen down are ignored
    fn up(&mut self, input: T) {
        if self.held.remove(&input) {
            self.released.insert(input);
        }
    }

    fn clear_transitions(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }
}

//=== StateTracker ========================================================

/// Level state (held) and edge state (pressed / released this frame) for
/// keys and mouse buttons, plus cursor position and delta.
#[derive(Debug)]
pub struct StateTracker {
    keys: HeldSet<KeyCode>,
    buttons: HeldSet<MouseButton>,
    modifiers: Modifiers,
    mouse_position: Vec2,
    frame_start_position: Vec2,
    mouse_delta: Vec2,
}

impl StateTracker {
    /// Creates a tracker with nothing held and the cursor at the origin.
    pub fn new() -> Self {
        Self {
            keys: HeldSet::new(),
            buttons: HeldSet::new(),
            modifiers: Modifiers::NONE,
            mouse_position: Vec2::ZERO,
            frame_start_position: Vec2::ZERO,
            mouse_delta: Vec2::ZERO,
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Forgets last frame's transitions; held state survives.
    pub(crate) fn begin_frame(&mut self) {
        self.keys.clear_transitions();
        self.buttons.clear_transitions();
        self.frame_start_position = self.mouse_position;
    }

    /// Applies a batch of events in order.
    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Applies a single event.
    pub(crate) fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = modifiers;
                self.keys.down(key);
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = modifiers;
                self.keys.up(key);
            }
            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = modifiers;
                self.buttons.down(button);
            }
            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = modifiers;
                self.buttons.up(button);
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = Vec2::new(x, y);
            }
        }
    }

    /// Computes the cursor delta for the frame.
    pub(crate) fn end_frame(&mut self) {
        self.mouse_delta = self.mouse_position - self.frame_start_position;
    }

    //=====================================================================
    // Queries
    //=====================================================================

    /// `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.held.contains(&key)
    }

    /// `true` only on the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.pressed.contains(&key)
    }

    /// `true` only on the frame the key went up.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys.released.contains(&key)
    }

    /// Like [`is_key_down`](Self::is_key_down) for mouse buttons.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons.held.contains(&button)
    }

    /// Like [`is_key_pressed`](Self::is_key_pressed) for mouse buttons.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons.pressed.contains(&button)
    }

    /// Like [`is_key_released`](Self::is_key_released) for mouse buttons.
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons.released.contains(&button)
    }

    /// Cursor position in window pixels (top-left origin).
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Cursor movement since the start of the frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Modifier flags from the most recent key/button event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Iterates over the keys currently held.
    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys.held.iter()
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

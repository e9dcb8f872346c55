//=========================================================================
// Action Binder
//=========================================================================
//
// Maps actions to ordered lists of physical bindings.
//
// Architecture:
//   action → HashMap → [Key(..), Mouse(..), ...] ──any held?──► bool
//
// Several bindings may share one action (logical OR). Queries read the
// live StateTracker on every call; nothing is cached.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{
    action::{Action, Binding},
    event::{KeyCode, MouseButton},
    state_tracker::StateTracker,
};

//=== ActionBinder ========================================================

/// Action → bindings table.
pub(crate) struct ActionBinder<A: Action> {
    bindings: HashMap<A, Vec<Binding>>,
}

impl<A: Action> ActionBinder<A> {
    pub(crate) fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    //--- Binding API ------------------------------------------------------

    /// Appends a binding. Duplicates are kept as-is.
    pub(crate) fn bind(&mut self, action: A, binding: Binding) {
        debug!("Binding {:?} to action {:?}", binding, action);
        self.bindings.entry(action).or_default().push(binding);
    }

    pub(crate) fn bind_key(&mut self, action: A, key: KeyCode) {
        self.bind(action, Binding::Key(key));
    }

    pub(crate) fn bind_mouse(&mut self, action: A, button: MouseButton) {
        self.bind(action, Binding::Mouse(button));
    }

    /// Bindings for an action in insertion order (empty if unknown).
    pub(crate) fn bindings(&self, action: A) -> &[Binding] {
        self.bindings.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    //--- Queries ----------------------------------------------------------

    /// `true` if any binding of `action` is held right now.
    pub(crate) fn is_active(&self, action: A, state: &StateTracker) -> bool {
        self.bindings(action).iter().any(|binding| match *binding {
            Binding::Key(key) => state.is_key_down(key),
            Binding::Mouse(button) => state.is_button_down(button),
        })
    }

    /// `true` if any binding of `action` went down this frame.
    pub(crate) fn is_pressed(&self, action: A, state: &StateTracker) -> bool {
        self.bindings(action).iter().any(|binding| match *binding {
            Binding::Key(key) => state.is_key_pressed(key),
            Binding::Mouse(button) => state.is_button_pressed(button),
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Input System
//=========================================================================
//
// Input binder facade: owns the live input state and the action table.
//
// Architecture:
//   InputEvent ─► StateTracker (held / pressed / released)
//                      │
//   ActionBinder ──────┴──► is_action_active() / is_action_pressed()
//
// Per frame the FrameLoop calls begin_frame() → process_events() →
// end_frame(); scenes query actions afterwards through GlobalContext.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod action;
pub mod event;
mod binder;
mod state_tracker;

//=== Public API ==========================================================

pub use action::{Action, Binding};
pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use state_tracker::StateTracker;

//=== Internal Dependencies ===============================================

use binder::ActionBinder;

//=== InputSystem =========================================================

/// Binds actions to keys/buttons and answers "is this action held?".
///
/// ```
/// use amana_engine::prelude::*;
///
/// let mut input = InputSystem::new();
/// input.bind_key("left", KeyCode::ArrowLeft);
/// input.bind_key("left", KeyCode::KeyA);
///
/// input.process_events(&[InputEvent::KeyDown {
///     key: KeyCode::KeyA,
///     modifiers: Modifiers::NONE,
/// }]);
/// assert!(input.is_action_active("left"));
/// assert!(!input.is_action_active("right"));
/// ```
pub struct InputSystem<A: Action> {
    state: StateTracker,
    binder: ActionBinder<A>,
}

impl<A: Action> InputSystem<A> {
    /// Creates a system with no bindings and nothing held.
    pub fn new() -> Self {
        Self {
            state: StateTracker::new(),
            binder: ActionBinder::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Appends a keyboard binding to `action`.
    ///
    /// No de-duplication is performed; binding the same key twice is
    /// harmless for queries but shows up in [`bindings`](Self::bindings).
    pub fn bind_key(&mut self, action: A, key: KeyCode) {
        self.binder.bind_key(action, key);
    }

    /// Appends a mouse button binding to `action`.
    pub fn bind_mouse(&mut self, action: A, button: MouseButton) {
        self.binder.bind_mouse(action, button);
    }

    /// Returns the bindings of `action` in the order they were added.
    pub fn bindings(&self, action: A) -> &[Binding] {
        self.binder.bindings(action)
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` while at least one input bound to `action` is held.
    ///
    /// Level-triggered and uncached. Unregistered actions, and actions
    /// with no bindings, are reported as inactive.
    pub fn is_action_active(&self, action: A) -> bool {
        self.binder.is_active(action, &self.state)
    }

    /// Returns `true` on the frame an input bound to `action` went down.
    pub fn is_action_pressed(&self, action: A) -> bool {
        self.binder.is_pressed(action, &self.state)
    }

    /// Raw keyboard / mouse state.
    pub fn state(&self) -> &StateTracker {
        &self.state
    }

    //--- Frame Processing -------------------------------------------------

    pub(crate) fn begin_frame(&mut self) {
        self.state.begin_frame();
    }

    /// Feeds host events into the live state.
    ///
    /// Normally driven by the frame loop; exposed for hosts that deliver
    /// events themselves.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        self.state.process_events(events);
    }

    pub(crate) fn end_frame(&mut self) {
        self.state.end_frame();
    }
}

impl<A: Action> Default for InputSystem<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn press(input: &mut InputSystem<&'static str>, key: KeyCode) {
        input.begin_frame();
        input.process_events(&[InputEvent::KeyDown { key, modifiers: Modifiers::NONE }]);
        input.end_frame();
    }

    fn release(input: &mut InputSystem<&'static str>, key: KeyCode) {
        input.begin_frame();
        input.process_events(&[InputEvent::KeyUp { key, modifiers: Modifiers::NONE }]);
        input.end_frame();
    }

    //=====================================================================
    // Action Queries
    //=====================================================================

    #[test]
    fn left_arrow_drives_left_action() {
        let mut input = InputSystem::new();
        input.bind_key("left", KeyCode::ArrowLeft);

        press(&mut input, KeyCode::ArrowLeft);
        assert!(input.is_action_active("left"));

        release(&mut input, KeyCode::ArrowLeft);
        assert!(!input.is_action_active("left"));
    }

    #[test]
    fn jump_is_active_iff_a_binding_is_held() {
        let mut input = InputSystem::new();
        input.bind_key("jump", KeyCode::Space);
        input.bind_mouse("jump", MouseButton::Left);

        assert!(!input.is_action_active("jump"));

        input.begin_frame();
        input.process_events(&[InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        }]);
        input.end_frame();
        assert!(input.is_action_active("jump"));

        press(&mut input, KeyCode::Space);
        input.begin_frame();
        input.process_events(&[InputEvent::MouseButtonUp {
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        }]);
        input.end_frame();
        assert!(input.is_action_active("jump"), "Space is still held");

        release(&mut input, KeyCode::Space);
        assert!(!input.is_action_active("jump"));
    }

    #[test]
    fn both_enter_keys_hold_confirm_independently() {
        let mut input = InputSystem::new();
        input.bind_key("confirm", KeyCode::Enter);
        input.bind_key("confirm", KeyCode::NumpadEnter);

        press(&mut input, KeyCode::Enter);
        press(&mut input, KeyCode::NumpadEnter);
        release(&mut input, KeyCode::NumpadEnter);
        assert!(input.is_action_active("confirm"), "Main Enter is still held");

        release(&mut input, KeyCode::Enter);
        assert!(!input.is_action_active("confirm"));
    }

    #[test]
    fn unbound_and_unknown_actions_are_inactive() {
        let mut input = InputSystem::new();
        input.bind_key("jump", KeyCode::Space);
        press(&mut input, KeyCode::Space);

        assert!(!input.is_action_active("crouch"));
        assert!(input.bindings("crouch").is_empty());
    }

    #[test]
    fn pressed_is_edge_triggered() {
        let mut input = InputSystem::new();
        input.bind_key("confirm", KeyCode::Enter);

        press(&mut input, KeyCode::Enter);
        assert!(input.is_action_pressed("confirm"));

        input.begin_frame();
        input.end_frame();
        assert!(!input.is_action_pressed("confirm"));
        assert!(input.is_action_active("confirm"));
    }

    #[test]
    fn raw_state_is_exposed() {
        let mut input = InputSystem::<&'static str>::new();
        press(&mut input, KeyCode::KeyQ);
        assert!(input.state().is_key_down(KeyCode::KeyQ));
    }
}

//=========================================================================
// Actions & Bindings
//=========================================================================
//
// Actions are logical inputs ("jump", "left") decoupled from the physical
// key or button that triggers them. A binding is one physical input.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use super::event::{KeyCode, MouseButton};

//=== Action Trait ========================================================

/// Marker trait for action identifiers.
///
/// Implemented for `&'static str`, so actions can simply be named:
///
/// ```
/// use amana_engine::prelude::*;
///
/// let mut input = InputSystem::<&'static str>::new();
/// input.bind_key("jump", KeyCode::Space);
/// assert!(!input.is_action_active("jump"));
/// ```
///
/// Games that prefer a closed set can use an enum instead:
///
/// ```
/// use amana_engine::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum GameAction { Jump, Shoot }
///
/// impl Action for GameAction {}
/// ```
pub trait Action: 'static + Copy + Eq + Hash + Debug {}

impl Action for &'static str {}

//=== Binding =============================================================

/// One physical input bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Keyboard key (physical location).
    Key(KeyCode),

    /// Mouse button.
    Mouse(MouseButton),
}

impl From<KeyCode> for Binding {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<MouseButton> for Binding {
    fn from(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

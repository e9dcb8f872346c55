//=========================================================================
// Host Input Events
//=========================================================================
//
// Portable keyboard/mouse event types delivered by the platform layer.
//
// Event Flow:
// ```text
// Platform (Winit) ─► InputEvent ─► StateTracker ─► ActionBinder
//                          │
//                          └──────► SceneManager (on_event / on_key_event /
//                                   on_mouse_button_event)
// ```
//
// Equality & hashing ignore mouse coordinates so the platform buffer can
// coalesce cursor motion into a single "last position" event per frame.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Thumb button, usually "back" in browsers.
    Back,

    /// Thumb button, usually "forward" in browsers.
    Forward,

    /// Any further button, by platform index.
    Other(u16),
}

//=== KeyCode =============================================================

/// Physical keyboard key (scancode semantics).
///
/// Identifies the key location, not the produced character: `KeyA` is the
/// same physical key on QWERTY and AZERTY layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    /// Numeric keypad: 0-9
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    NumpadEnter,
    Escape,
    Tab,
    Backspace,
    Delete,
}

//=== Modifiers ===========================================================

/// Modifier key flags sampled when an event was produced.
///
/// Left and right variants are not distinguished. On macOS, Command maps to
/// `ctrl` and Option to `alt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };

    /// Shift only.
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };

    /// Ctrl only.
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };

    /// Alt only.
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };

    /// Returns `true` when no modifier is held.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

//=== InputEvent ==========================================================

/// A single input event from the host.
///
/// # Equality & Hashing
///
/// ```text
/// KeyDown{A, CTRL} == KeyDown{A, CTRL}       ✓
/// KeyDown{A, CTRL} == KeyDown{A, NONE}       ✗
/// KeyDown{A}       == KeyUp{A}               ✗
/// MouseMoved{..}   == MouseMoved{..}         ✓ (coordinates ignored)
/// ```
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// Key went down.
    KeyDown { key: KeyCode, modifiers: Modifiers },

    /// Key went up.
    KeyUp { key: KeyCode, modifiers: Modifiers },

    /// Mouse button went down.
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },

    /// Mouse button went up.
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },

    /// Cursor moved, in window pixels from the top-left corner.
    MouseMoved { x: f32, y: f32 },
}

impl InputEvent {
    /// Returns `true` for `KeyDown` / `KeyUp`.
    pub fn is_key_event(&self) -> bool {
        matches!(self, Self::KeyDown { .. } | Self::KeyUp { .. })
    }

    /// Returns `true` for `MouseButtonDown` / `MouseButtonUp`.
    pub fn is_mouse_button_event(&self) -> bool {
        matches!(self, Self::MouseButtonDown { .. } | Self::MouseButtonUp { .. })
    }

    /// Modifier flags carried by the event (`NONE` for cursor motion).
    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::KeyDown { modifiers, .. }
            | Self::KeyUp { modifiers, .. }
            | Self::MouseButtonDown { modifiers, .. }
            | Self::MouseButtonUp { modifiers, .. } => *modifiers,
            Self::MouseMoved { .. } => Modifiers::NONE,
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a, modifiers: ma }, KeyDown { key: b, modifiers: mb })
            | (KeyUp { key: a, modifiers: ma }, KeyUp { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (
                MouseButtonDown { button: a, modifiers: ma },
                MouseButtonDown { button: b, modifiers: mb },
            )
            | (
                MouseButtonUp { button: a, modifiers: ma },
                MouseButtonUp { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown { key, modifiers } | Self::KeyUp { key, modifiers } => {
                key.hash(state);
                modifiers.hash(state);
            }
            Self::MouseButtonDown { button, modifiers }
            | Self::MouseButtonUp { button, modifiers } => {
                button.hash(state);
                modifiers.hash(state);
            }
            // Coordinates stay out of the hash (consistent with eq)
            Self::MouseMoved { .. } => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

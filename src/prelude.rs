//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use amana_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::core::platform_bridge::PlatformError;

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};

// Input system
pub use crate::core::input::{
    Action, Binding, InputEvent, InputSystem, KeyCode, Modifiers, MouseButton, StateTracker,
};

// Scene system
pub use crate::core::scene::{Scene, SceneError, SceneKey, SceneManager};

// Camera and render objects
pub use crate::core::camera::{Camera, Rect, MIN_ZOOM};
pub use crate::core::objects::{ObjectArena, ObjectHandle, RenderObject};

// Math
pub use glam::Vec2;

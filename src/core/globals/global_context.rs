//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for scenes.
//
// Contains state data that scenes read/write:
// - input: action bindings and live key/mouse state
// - camera: the 2D view onto the world
// - objects: render objects the camera can follow
// - scene_requests: queued scene switches
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::camera::Camera;
use crate::core::input::{Action, InputSystem};
use crate::core::objects::ObjectArena;
use crate::core::scene::{SceneKey, TransitionQueue};

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during their hooks.
///
/// Scenes receive `&mut GlobalContext` in every hook except `draw`, which
/// gets a shared reference.
pub struct GlobalContext<S: SceneKey, A: Action> {
    /// Action bindings and raw input state.
    pub input: InputSystem<A>,

    /// The 2D camera, sized to the viewport.
    pub camera: Camera,

    /// Render objects (camera follow targets, sprites, ...).
    pub objects: ObjectArena,

    /// Scene switches requested during the current hook.
    pub(crate) scene_requests: TransitionQueue<S>,
}

impl<S: SceneKey, A: Action> GlobalContext<S, A> {
    /// Creates a context with a camera sized `width` × `height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            input: InputSystem::new(),
            camera: Camera::new(width, height),
            objects: ObjectArena::new(),
            scene_requests: TransitionQueue::new(),
        }
    }

    /// Requests a switch to `key`.
    ///
    /// Applied by the scene manager as soon as the current hook returns.
    /// Requests for unregistered scenes are logged and ignored.
    pub fn set_scene(&mut self, key: S) {
        self.scene_requests.push(key);
    }

    /// `true` if a switch has been requested and not yet applied.
    pub fn has_pending_scene(&self) -> bool {
        !self.scene_requests.is_empty()
    }
}

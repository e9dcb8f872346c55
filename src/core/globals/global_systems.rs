//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Systems operate on GlobalContext data; the FrameLoop drives them.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::input::{Action, InputEvent};
use crate::core::scene::{SceneKey, SceneManager};

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// # Available Systems
///
/// - `scene_manager`: registered scenes and the active one
pub struct GlobalSystems<S: SceneKey, A: Action> {
    /// The scene manager for registration, switching and forwarding.
    pub scene_manager: SceneManager<S, A>,
}

impl<S: SceneKey, A: Action> GlobalSystems<S, A> {
    pub fn new() -> Self {
        Self {
            scene_manager: SceneManager::new(),
        }
    }

    //--- Update Pipeline --------------------------------------------------

    /// Runs one frame of logic against `context`.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Input state**: feeds every batch into the input system
    /// 2. **Resize**: camera first, then the active scene
    /// 3. **Event forwarding**: `on_event` plus the key / mouse hook
    /// 4. **Scene update**: `update(dt)`
    /// 5. **Camera**: follow / auto-move, then view matrix refresh
    pub(crate) fn update(
        &mut self,
        context: &mut GlobalContext<S, A>,
        batches: &[Vec<InputEvent>],
        resize: Option<(u32, u32)>,
        dt: f32,
    ) {
        // 1. Input state
        context.input.begin_frame();
        for batch in batches {
            context.input.process_events(batch);
        }
        context.input.end_frame();

        // 2. Resize
        if let Some((width, height)) = resize {
            context.camera.on_resize(width, height);
            self.scene_manager.on_resize(width, height, context);
        }

        // 3. Event forwarding
        for event in batches.iter().flatten() {
            trace!("Forwarding {:?}", event);
            self.scene_manager.on_event(event, context);

            if event.is_key_event() {
                self.scene_manager.on_key_event(event, context);
            } else if event.is_mouse_button_event() {
                self.scene_manager.on_mouse_button_event(event, context);
            }
        }

        // 4. Scene update
        self.scene_manager.update(dt, context);

        // 5. Camera
        context.camera.tick(dt, &context.objects);
    }

    /// Lets the active scene emit the frame.
    pub(crate) fn draw(&mut self, context: &GlobalContext<S, A>) {
        self.scene_manager.draw(context);
    }
}

impl<S: SceneKey, A: Action> Default for GlobalSystems<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Scene System
//=========================================================================
//
// Scenes are the units of game state (menu, gameplay, editor, ...). The
// game names them with a closed set of keys and implements the `Scene`
// capability trait for each; the SceneManager keeps exactly one active.
//
// Architecture:
//   SceneManager
//     ├─ scenes: HashMap<S, Box<dyn Scene<S, A>>>
//     └─ active: Option<S>
//
// Flow (per frame):
//   events → on_event / on_key_event / on_mouse_button_event
//          → update(dt) → draw()
//   after every hook: queued ctx.set_scene() requests are applied
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::input::{Action, InputEvent};

//=== Module Declarations =================================================

mod manager;
mod transition_queue;

//=== Public API ==========================================================

pub use manager::{SceneError, SceneKey, SceneManager};
pub use transition_queue::TransitionQueue;

//=== Scene Trait =========================================================

/// Lifecycle and per-frame hooks of a scene.
///
/// Only [`caption`](Scene::caption) and [`update`](Scene::update) are
/// required; every other hook defaults to doing nothing.
///
/// To switch scenes, call [`GlobalContext::set_scene`] from any hook. The
/// switch completes before the frame continues.
///
/// ```rust
/// # use amana_engine::prelude::*;
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum GameScene { Menu, Game }
/// impl SceneKey for GameScene {}
///
/// struct Menu;
///
/// impl Scene<GameScene, &'static str> for Menu {
///     fn caption(&self) -> &str {
///         "Main Menu"
///     }
///
///     fn update(&mut self, _dt: f32, ctx: &mut GlobalContext<GameScene, &'static str>) {
///         if ctx.input.is_action_pressed("confirm") {
///             ctx.set_scene(GameScene::Game);
///         }
///     }
/// }
/// ```
pub trait Scene<S: SceneKey, A: Action> {
    /// Display caption (shown as the window title while active).
    fn caption(&self) -> &str;

    /// Runs once, right before the scene's first `on_enter`.
    fn init(&mut self, _ctx: &mut GlobalContext<S, A>) {}

    /// Called when the scene becomes active.
    fn on_enter(&mut self, _ctx: &mut GlobalContext<S, A>) {}

    /// Called when the scene stops being active.
    fn on_exit(&mut self, _ctx: &mut GlobalContext<S, A>) {}

    /// Advances the scene by `dt` seconds.
    fn update(&mut self, dt: f32, ctx: &mut GlobalContext<S, A>);

    /// Emits the frame. Runs after `update` every frame.
    fn draw(&mut self, _ctx: &GlobalContext<S, A>) {}

    /// Receives every input event of the frame.
    fn on_event(&mut self, _event: &InputEvent, _ctx: &mut GlobalContext<S, A>) {}

    /// Receives `KeyDown` / `KeyUp` events (after `on_event`).
    fn on_key_event(&mut self, _event: &InputEvent, _ctx: &mut GlobalContext<S, A>) {}

    /// Receives `MouseButtonDown` / `MouseButtonUp` events (after `on_event`).
    fn on_mouse_button_event(&mut self, _event: &InputEvent, _ctx: &mut GlobalContext<S, A>) {}

    /// Viewport resized; the camera has already been updated.
    fn on_resize(&mut self, _width: u32, _height: u32, _ctx: &mut GlobalContext<S, A>) {}
}

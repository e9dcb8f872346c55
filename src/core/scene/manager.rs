//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns every registered scene and tracks the single active one.
//
// Transition protocol (set_scene):
//   unregistered key ──► Err, nothing touched
//   key == active    ──► Ok, nothing touched
//   otherwise        ──► old.on_exit → active = key → [init once] → on_enter
//
// Scenes are stored by key and referenced only by key, so the active
// reference can never outlive its scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, info, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::globals::GlobalContext;
use crate::core::input::{Action, InputEvent};

//=== Constants ===========================================================

/// Rounds of chained requests (a scene switching again from `on_enter`)
/// applied before the rest are dropped.
const MAX_REQUEST_ROUNDS: usize = 16;

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Typically a game-specific enum listing every scene.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== SceneError ==========================================================

/// Scene transition failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No scene is registered under the requested key.
    #[error("scene {0} is not registered")]
    Unregistered(String),
}

//=== Scene Manager =======================================================

struct SceneSlot<S: SceneKey, A: Action> {
    scene: Box<dyn Scene<S, A>>,
    initialized: bool,
}

/// Keeps the registered scenes and switches between them.
pub struct SceneManager<S: SceneKey, A: Action> {
    scenes: HashMap<S, SceneSlot<S, A>>,
    active: Option<S>,
}

impl<S: SceneKey, A: Action> SceneManager<S, A> {
    //--- Construction -----------------------------------------------------

    /// Creates a manager with no scenes and nothing active.
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            active: None,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers `scene` under `key`, replacing any previous registration.
    ///
    /// The active scene cannot be replaced; such calls are ignored.
    pub fn register_scene<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S, A> + 'static,
    {
        if self.active == Some(key) {
            warn!("Scene {:?} is active and cannot be replaced", key);
            return;
        }

        let slot = SceneSlot { scene: Box::new(scene), initialized: false };
        if self.scenes.insert(key, slot).is_some() {
            warn!("Scene {:?} was already registered and has been replaced", key);
        } else {
            debug!("Registered scene {:?}", key);
        }
    }

    pub fn is_registered(&self, key: S) -> bool {
        self.scenes.contains_key(&key)
    }

    //--- Transitions ------------------------------------------------------

    /// Makes `key` the active scene.
    ///
    /// # Errors
    ///
    /// [`SceneError::Unregistered`] if no scene was registered under
    /// `key`. The active scene is left untouched and no hook runs.
    pub fn set_scene(&mut self, key: S, ctx: &mut GlobalContext<S, A>) -> Result<(), SceneError> {
        if !self.scenes.contains_key(&key) {
            return Err(SceneError::Unregistered(format!("{:?}", key)));
        }

        if self.active == Some(key) {
            debug!("Scene {:?} is already active", key);
            return Ok(());
        }

        if let Some(old) = self.active {
            if let Some(slot) = self.scenes.get_mut(&old) {
                slot.scene.on_exit(ctx);
            }
        }

        self.active = Some(key);

        if let Some(slot) = self.scenes.get_mut(&key) {
            if !slot.initialized {
                slot.scene.init(ctx);
                slot.initialized = true;
            }
            slot.scene.on_enter(ctx);
            info!("Switched to scene {:?} ({})", key, slot.scene.caption());
        }

        Ok(())
    }

    /// Applies the switch requests scenes queued through
    /// [`GlobalContext::set_scene`], oldest first.
    pub fn process_requests(&mut self, ctx: &mut GlobalContext<S, A>) {
        for _ in 0..MAX_REQUEST_ROUNDS {
            let requests = ctx.scene_requests.take();
            if requests.is_empty() {
                return;
            }

            for key in requests {
                if let Err(e) = self.set_scene(key, ctx) {
                    warn!("Scene request ignored: {}", e);
                }
            }
        }

        if !ctx.scene_requests.is_empty() {
            warn!(
                "Dropping {} scene requests after {} chained rounds",
                ctx.scene_requests.len(),
                MAX_REQUEST_ROUNDS
            );
            ctx.scene_requests.clear();
        }
    }

    /// Exits the active scene and drops every scene.
    pub fn shutdown(&mut self, ctx: &mut GlobalContext<S, A>) {
        if let Some(key) = self.active.take() {
            debug!("Exiting scene {:?} for shutdown", key);
            if let Some(slot) = self.scenes.get_mut(&key) {
                slot.scene.on_exit(ctx);
            }
        }

        ctx.scene_requests.clear();
        self.scenes.clear();
    }

    //--- Queries ----------------------------------------------------------

    /// Key of the active scene, `None` before the first switch.
    pub fn active_key(&self) -> Option<S> {
        self.active
    }

    /// The active scene, `None` before the first switch.
    pub fn active_scene(&self) -> Option<&dyn Scene<S, A>> {
        let key = self.active?;
        self.scenes.get(&key).map(|slot| slot.scene.as_ref())
    }

    /// Caption of the active scene.
    pub fn caption(&self) -> Option<&str> {
        self.active_scene().map(|scene| scene.caption())
    }

    //--- Per-Frame Forwarding ---------------------------------------------
    //
    // All of these are no-ops while no scene is active.
    //

    pub fn update(&mut self, dt: f32, ctx: &mut GlobalContext<S, A>) {
        if let Some(scene) = self.active_scene_mut() {
            scene.update(dt, ctx);
        }
        self.process_requests(ctx);
    }

    pub fn draw(&mut self, ctx: &GlobalContext<S, A>) {
        if let Some(scene) = self.active_scene_mut() {
            scene.draw(ctx);
        }
    }

    pub fn on_event(&mut self, event: &InputEvent, ctx: &mut GlobalContext<S, A>) {
        if let Some(scene) = self.active_scene_mut() {
            scene.on_event(event, ctx);
        }
        self.process_requests(ctx);
    }

    pub fn on_key_event(&mut self, event: &InputEvent, ctx: &mut GlobalContext<S, A>) {
        if let Some(scene) = self.active_scene_mut() {
            scene.on_key_event(event, ctx);
        }
        self.process_requests(ctx);
    }

    pub fn on_mouse_button_event(&mut self, event: &InputEvent, ctx: &mut GlobalContext<S, A>) {
        if let Some(scene) = self.active_scene_mut() {
            scene.on_mouse_button_event(event, ctx);
        }
        self.process_requests(ctx);
    }

    pub fn on_resize(&mut self, width: u32, height: u32, ctx: &mut GlobalContext<S, A>) {
        if let Some(scene) = self.active_scene_mut() {
            scene.on_resize(width, height, ctx);
        }
        self.process_requests(ctx);
    }

    //--- Internal Helpers -------------------------------------------------

    fn active_scene_mut(&mut self) -> Option<&mut Box<dyn Scene<S, A>>> {
        let key = self.active?;
        self.scenes.get_mut(&key).map(|slot| &mut slot.scene)
    }
}

impl<S: SceneKey, A: Action> Default for SceneManager<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::core::input::{KeyCode, Modifiers};

    //--- Mock Types -------------------------------------------------------

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        Menu,
        Game,
        Editor,
    }

    impl SceneKey for TestScene {}

    type Log = Rc<RefCell<Vec<String>>>;
    type Ctx = GlobalContext<TestScene, &'static str>;

    /// Records every hook into a shared log; optionally requests a switch
    /// from `update` or `on_enter`.
    struct Recorder {
        name: &'static str,
        log: Log,
        switch_on_update: Option<TestScene>,
        switch_on_enter: Option<TestScene>,
    }

    impl Recorder {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                switch_on_update: None,
                switch_on_enter: None,
            }
        }

        fn record(&self, hook: &str) {
            self.log.borrow_mut().push(format!("{}.{}", self.name, hook));
        }
    }

    impl Scene<TestScene, &'static str> for Recorder {
        fn caption(&self) -> &str {
            self.name
        }

        fn init(&mut self, _ctx: &mut Ctx) {
            self.record("init");
        }

        fn on_enter(&mut self, ctx: &mut Ctx) {
            self.record("enter");
            if let Some(next) = self.switch_on_enter {
                ctx.set_scene(next);
            }
        }

        fn on_exit(&mut self, _ctx: &mut Ctx) {
            self.record("exit");
        }

        fn update(&mut self, _dt: f32, ctx: &mut Ctx) {
            self.record("update");
            if let Some(next) = self.switch_on_update {
                ctx.set_scene(next);
            }
        }

        fn draw(&mut self, _ctx: &Ctx) {
            self.record("draw");
        }

        fn on_key_event(&mut self, _event: &InputEvent, _ctx: &mut Ctx) {
            self.record("key");
        }
    }

    fn setup() -> (SceneManager<TestScene, &'static str>, Ctx, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = SceneManager::new();
        manager.register_scene(TestScene::Menu, Recorder::new("menu", &log));
        manager.register_scene(TestScene::Game, Recorder::new("game", &log));
        (manager, GlobalContext::new(800, 600), log)
    }

    fn entries(log: &Log) -> Vec<String> {
        log.borrow_mut().drain(..).collect()
    }

    //=====================================================================
    // Transition Protocol
    //=====================================================================

    #[test]
    fn starts_with_no_scene() {
        let (manager, _ctx, _log) = setup();
        assert_eq!(manager.active_key(), None);
        assert!(manager.active_scene().is_none());
        assert_eq!(manager.caption(), None);
    }

    #[test]
    fn menu_then_game_runs_exit_before_enter() {
        let (mut manager, mut ctx, log) = setup();

        assert!(manager.set_scene(TestScene::Menu, &mut ctx).is_ok());
        assert_eq!(entries(&log), vec!["menu.init", "menu.enter"]);
        assert_eq!(manager.active_key(), Some(TestScene::Menu));

        assert!(manager.set_scene(TestScene::Game, &mut ctx).is_ok());
        assert_eq!(entries(&log), vec!["menu.exit", "game.init", "game.enter"]);
        assert_eq!(manager.active_key(), Some(TestScene::Game));
        assert_eq!(manager.caption(), Some("game"));
    }

    #[test]
    fn init_runs_only_once_per_scene() {
        let (mut manager, mut ctx, log) = setup();

        manager.set_scene(TestScene::Menu, &mut ctx).unwrap();
        manager.set_scene(TestScene::Game, &mut ctx).unwrap();
        entries(&log);

        manager.set_scene(TestScene::Menu, &mut ctx).unwrap();
        assert_eq!(entries(&log), vec!["game.exit", "menu.enter"]);
    }

    #[test]
    fn unregistered_scene_fails_without_side_effects() {
        let (mut manager, mut ctx, log) = setup();
        manager.set_scene(TestScene::Menu, &mut ctx).unwrap();
        entries(&log);

        let result = manager.set_scene(TestScene::Editor, &mut ctx);

        assert_eq!(result, Err(SceneError::Unregistered("Editor".to_string())));
        assert_eq!(manager.active_key(), Some(TestScene::Menu));
        assert!(entries(&log).is_empty(), "No hook may run on failure");
    }

    #[test]
    fn unregistered_scene_from_empty_state_stays_empty() {
        let (mut manager, mut ctx, _log) = setup();
        assert!(manager.set_scene(TestScene::Editor, &mut ctx).is_err());
        assert_eq!(manager.active_key(), None);
    }

    #[test]
    fn setting_active_scene_again_is_a_no_op() {
        let (mut manager, mut ctx, log) = setup();
        manager.set_scene(TestScene::Menu, &mut ctx).unwrap();
        entries(&log);

        assert!(manager.set_scene(TestScene::Menu, &mut ctx).is_ok());
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn every_switch_exits_exactly_the_previous_scene() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = SceneManager::new();
        manager.register_scene(TestScene::Menu, Recorder::new("menu", &log));
        manager.register_scene(TestScene::Game, Recorder::new("game", &log));
        manager.register_scene(TestScene::Editor, Recorder::new("editor", &log));
        let mut ctx: Ctx = GlobalContext::new(800, 600);

        let sequence = [
            TestScene::Menu,
            TestScene::Game,
            TestScene::Editor,
            TestScene::Menu,
            TestScene::Editor,
        ];
        for key in sequence {
            manager.set_scene(key, &mut ctx).unwrap();
        }

        let hooks: Vec<String> = entries(&log)
            .into_iter()
            .filter(|entry| entry.ends_with(".enter") || entry.ends_with(".exit"))
            .collect();
        assert_eq!(
            hooks,
            vec![
                "menu.enter",
                "menu.exit", "game.enter",
                "game.exit", "editor.enter",
                "editor.exit", "menu.enter",
                "menu.exit", "editor.enter",
            ]
        );
    }

    //=====================================================================
    // Scene-Initiated Transitions
    //=====================================================================

    #[test]
    fn scene_requests_switch_from_update() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut menu = Recorder::new("menu", &log);
        menu.switch_on_update = Some(TestScene::Game);

        let mut manager = SceneManager::new();
        manager.register_scene(TestScene::Menu, menu);
        manager.register_scene(TestScene::Game, Recorder::new("game", &log));
        let mut ctx: Ctx = GlobalContext::new(800, 600);

        manager.set_scene(TestScene::Menu, &mut ctx).unwrap();
        entries(&log);

        manager.update(0.016, &mut ctx);

        assert_eq!(entries(&log), vec!["menu.update", "menu.exit", "game.init", "game.enter"]);
        assert_eq!(manager.active_key(), Some(TestScene::Game));
    }

    #[test]
    fn chained_request_from_on_enter_is_followed() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut game = Recorder::new("game", &log);
        game.switch_on_enter = Some(TestScene::Editor);

        let mut manager = SceneManager::new();
        manager.register_scene(TestScene::Game, game);
        manager.register_scene(TestScene::Editor, Recorder::new("editor", &log));
        let mut ctx: Ctx = GlobalContext::new(800, 600);

        ctx.set_scene(TestScene::Game);
        assert!(ctx.has_pending_scene());
        manager.process_requests(&mut ctx);

        assert_eq!(manager.active_key(), Some(TestScene::Editor));
        assert!(!ctx.has_pending_scene());
        assert!(ctx.scene_requests.is_empty());
    }

    #[test]
    fn ping_pong_requests_are_bounded() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut menu = Recorder::new("menu", &log);
        menu.switch_on_enter = Some(TestScene::Game);
        let mut game = Recorder::new("game", &log);
        game.switch_on_enter = Some(TestScene::Menu);

        let mut manager = SceneManager::new();
        manager.register_scene(TestScene::Menu, menu);
        manager.register_scene(TestScene::Game, game);
        let mut ctx: Ctx = GlobalContext::new(800, 600);

        ctx.set_scene(TestScene::Menu);
        manager.process_requests(&mut ctx);

        assert!(ctx.scene_requests.is_empty(), "Runaway requests are dropped");
        assert!(manager.active_key().is_some());
    }

    #[test]
    fn request_for_unregistered_scene_is_ignored() {
        let (mut manager, mut ctx, _log) = setup();
        manager.set_scene(TestScene::Menu, &mut ctx).unwrap();

        ctx.set_scene(TestScene::Editor);
        manager.process_requests(&mut ctx);

        assert_eq!(manager.active_key(), Some(TestScene::Menu));
    }

    //=====================================================================
    // Forwarding
    //=====================================================================

    #[test]
    fn forwarding_without_scene_is_a_no_op() {
        let (mut manager, mut ctx, log) = setup();
        let event = InputEvent::KeyDown { key: KeyCode::Enter, modifiers: Modifiers::NONE };

        manager.update(0.016, &mut ctx);
        manager.on_event(&event, &mut ctx);
        manager.on_key_event(&event, &mut ctx);
        manager.draw(&ctx);

        assert!(entries(&log).is_empty());
    }

    #[test]
    fn forwarding_reaches_active_scene_only() {
        let (mut manager, mut ctx, log) = setup();
        manager.set_scene(TestScene::Game, &mut ctx).unwrap();
        entries(&log);

        let event = InputEvent::KeyDown { key: KeyCode::Enter, modifiers: Modifiers::NONE };
        manager.on_key_event(&event, &mut ctx);
        manager.update(0.016, &mut ctx);
        manager.draw(&ctx);

        assert_eq!(entries(&log), vec!["game.key", "game.update", "game.draw"]);
    }

    //=====================================================================
    // Registration & Shutdown
    //=====================================================================

    #[test]
    fn active_scene_cannot_be_replaced() {
        let (mut manager, mut ctx, log) = setup();
        manager.set_scene(TestScene::Menu, &mut ctx).unwrap();

        manager.register_scene(TestScene::Menu, Recorder::new("impostor", &log));

        assert_eq!(manager.caption(), Some("menu"));
    }

    #[test]
    fn shutdown_exits_active_scene_and_drops_all() {
        let (mut manager, mut ctx, log) = setup();
        manager.set_scene(TestScene::Game, &mut ctx).unwrap();
        entries(&log);

        manager.shutdown(&mut ctx);

        assert_eq!(entries(&log), vec!["game.exit"]);
        assert_eq!(manager.active_key(), None);
        assert!(!manager.is_registered(TestScene::Menu));
    }
}

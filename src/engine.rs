//=========================================================================
// Amana Engine
//=========================================================================
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  Engine  ──run()──>  [Runtime]
//         │                          │                    │
//         ├─ with_title()            └─ owns FrameLoop    └─ winit event loop
//         ├─ with_window_size()         + channel            ticks FrameLoop
//         ├─ with_channel_capacity()                         per redraw
//         └─ with_max_frame_dt()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Sender};
use log::info;

//=== Internal Dependencies ===============================================

use crate::core::globals::{GlobalContext, GlobalSystems};
use crate::core::input::Action;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use crate::core::scene::{SceneError, SceneKey};
use crate::core::FrameLoop;
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Title**: "Amana" (shown until a scene is active)
/// - **Window size**: 800 × 600 logical pixels
/// - **Channel capacity**: 128 events
/// - **Max frame dt**: 0.25 s
///
/// # Examples
///
/// ```no_run
/// use amana_engine::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum GameScene { Main }
/// impl SceneKey for GameScene {}
///
/// struct Main;
/// impl Scene<GameScene, &'static str> for Main {
///     fn caption(&self) -> &str { "Main" }
///     fn update(&mut self, _dt: f32, _ctx: &mut GlobalContext<GameScene, &'static str>) {}
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// EngineBuilder::<GameScene, &'static str>::new()
///     .with_title("My Game")
///     .with_window_size(1280, 720)
///     .build()
///     .init(|systems, ctx| {
///         ctx.input.bind_key("jump", KeyCode::Space);
///         systems.scene_manager.register_scene(GameScene::Main, Main);
///         systems.scene_manager.set_scene(GameScene::Main, ctx)
///     })?
///     .run()?;
/// # Ok(())
/// # }
/// ```
pub struct EngineBuilder<S: SceneKey, A: Action> {
    title: String,
    width: u32,
    height: u32,
    channel_capacity: usize,
    max_frame_dt: f32,
    _phantom: std::marker::PhantomData<(S, A)>,
}

impl<S: SceneKey, A: Action> EngineBuilder<S, A> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Amana".to_string(),
            width: 800,
            height: 600,
            channel_capacity: 128,
            max_frame_dt: 0.25,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Window title used while no scene is active.
    ///
    /// Default: "Amana"
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    ///
    /// Default: 800 × 600
    ///
    /// # Panics
    ///
    /// Panics if either side is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero, got {}x{}", width, height);
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the channel capacity for platform → frame loop events.
    ///
    /// Events sent while the channel is full are dropped with a warning.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Longest frame delta handed to scenes, in seconds.
    ///
    /// Longer frames (window drags, breakpoints) are clamped so movement
    /// does not jump.
    ///
    /// Default: 0.25
    ///
    /// # Panics
    ///
    /// Panics if `seconds <= 0.0`.
    pub fn with_max_frame_dt(mut self, seconds: f32) -> Self {
        assert!(seconds > 0.0, "Max frame dt must be positive, got {}", seconds);
        self.max_frame_dt = seconds;
        self
    }

    /// Builds the engine: channel, context and systems are created here.
    pub fn build(self) -> Engine<S, A> {
        info!(
            "Building engine ('{}', {}x{}, channel: {}, max dt: {}s)",
            self.title, self.width, self.height, self.channel_capacity, self.max_frame_dt
        );

        let (sender, receiver) = bounded(self.channel_capacity);
        let frame_loop = FrameLoop::new(receiver, self.width, self.height, self.max_frame_dt);

        Engine {
            config: WindowConfig { title: self.title, width: self.width, height: self.height },
            frame_loop,
            sender,
        }
    }
}

impl<S: SceneKey, A: Action> Default for EngineBuilder<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Amana engine runtime.
///
/// Create via [`EngineBuilder`], configure the game in [`init`](Self::init),
/// then hand control to the window with [`run`](Self::run).
pub struct Engine<S: SceneKey, A: Action> {
    config: WindowConfig,
    frame_loop: FrameLoop<S, A>,
    sender: Sender<PlatformEvent>,
}

impl<S: SceneKey, A: Action> Engine<S, A> {
    //--- Initialization ---------------------------------------------------

    /// Configures the game before the window opens.
    ///
    /// `setup` receives the systems (scene registration and switching) and
    /// the context (input bindings, camera, objects).
    ///
    /// # Errors
    ///
    /// Whatever `setup` returns, typically [`SceneError::Unregistered`]
    /// from the initial `set_scene`.
    pub fn init<F>(mut self, setup: F) -> Result<Self, SceneError>
    where
        F: FnOnce(&mut GlobalSystems<S, A>, &mut GlobalContext<S, A>) -> Result<(), SceneError>,
    {
        info!("Initializing engine systems");
        self.frame_loop.init(setup)?;
        info!("Engine initialization complete");
        Ok(self)
    }

    //--- Execution --------------------------------------------------------

    /// Opens the window and runs until it closes.
    ///
    /// Scenes are shut down (the active one receives `on_exit`) before
    /// this returns.
    ///
    /// # Errors
    ///
    /// [`PlatformError`] if the winit event loop cannot be created or
    /// fails while running.
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting engine runtime");

        let platform = Platform::new(self.config, self.frame_loop, self.sender);
        platform.run()?;

        info!("Engine shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crate::core::scene::Scene;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
        Missing,
    }

    impl SceneKey for TestScene {}

    type Builder = EngineBuilder<TestScene, &'static str>;

    struct Main;

    impl Scene<TestScene, &'static str> for Main {
        fn caption(&self) -> &str {
            "Main"
        }

        fn update(&mut self, _dt: f32, _ctx: &mut GlobalContext<TestScene, &'static str>) {}
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = Builder::new();
        assert_eq!(builder.title, "Amana");
        assert_eq!((builder.width, builder.height), (800, 600));
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.max_frame_dt, 0.25);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let builder = Builder::new()
            .with_title("Demo")
            .with_window_size(1280, 720)
            .with_channel_capacity(256)
            .with_max_frame_dt(0.1);

        assert_eq!(builder.title, "Demo");
        assert_eq!((builder.width, builder.height), (1280, 720));
        assert_eq!(builder.channel_capacity, 256);
        assert_eq!(builder.max_frame_dt, 0.1);
    }

    #[test]
    #[should_panic(expected = "Window size must be non-zero")]
    fn builder_with_window_size_panics_on_zero() {
        Builder::new().with_window_size(0, 600);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        Builder::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Max frame dt must be positive")]
    fn builder_with_max_frame_dt_panics_on_zero() {
        Builder::new().with_max_frame_dt(0.0);
    }

    #[test]
    fn build_sizes_camera_to_window() {
        let engine = Builder::new().with_window_size(1024, 768).build();
        assert_eq!(engine.frame_loop.context().camera.size(), (1024, 768));
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn init_registers_and_enters_scene() {
        let engine = Builder::new()
            .build()
            .init(|systems, ctx| {
                ctx.input.bind_key("jump", KeyCode::Space);
                systems.scene_manager.register_scene(TestScene::Main, Main);
                systems.scene_manager.set_scene(TestScene::Main, ctx)
            })
            .unwrap();

        assert_eq!(engine.frame_loop.caption(), Some("Main"));
        assert_eq!(engine.frame_loop.context().input.bindings("jump").len(), 1);
    }

    #[test]
    fn init_fails_on_unregistered_first_scene() {
        let result = Builder::new()
            .build()
            .init(|systems, ctx| systems.scene_manager.set_scene(TestScene::Missing, ctx));

        assert!(matches!(result, Err(SceneError::Unregistered(_))));
    }
}

//=========================================================================
// Core Systems
//=========================================================================
//
// Everything that runs between two presented frames.
//
// Architecture:
//   Receiver<PlatformEvent> → EventCollector
//                                  │
//   FrameLoop::tick(dt) ───────────┴──► GlobalSystems::update(GlobalContext)
//                                    └─► GlobalSystems::draw(GlobalContext)
//
// The FrameLoop runs on whichever thread owns the window; the platform
// ticks it once per redraw.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod camera;
pub mod globals;
pub mod input;
pub mod objects;
pub mod platform_bridge;
pub mod scene;

//=== External Dependencies ===============================================

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use globals::{GlobalContext, GlobalSystems};
use input::Action;
use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use scene::{SceneError, SceneKey};

//=== FrameLoop ===========================================================

/// Per-frame pipeline driving input, scenes and the camera.
///
/// Each [`tick`](Self::tick):
///
/// 1. collects platform events (exits on close or disconnect)
/// 2. feeds them into the input state
/// 3. applies a pending resize to the camera, then the scene
/// 4. forwards every event to the active scene
/// 5. runs `update(dt)`, then the camera `tick`, then `draw`
pub struct FrameLoop<S: SceneKey, A: Action> {
    collector: EventCollector,
    systems: GlobalSystems<S, A>,
    context: GlobalContext<S, A>,
    max_frame_dt: f32,
}

impl<S: SceneKey, A: Action> FrameLoop<S, A> {
    //--- Construction -----------------------------------------------------

    /// Creates a loop reading from `receiver` with a camera sized
    /// `width` × `height`.
    ///
    /// Frame deltas above `max_frame_dt` seconds are clamped.
    ///
    /// # Panics
    ///
    /// Panics if `max_frame_dt` is not a positive number.
    pub fn new(receiver: Receiver<PlatformEvent>, width: u32, height: u32, max_frame_dt: f32) -> Self {
        assert!(max_frame_dt > 0.0, "Max frame dt must be positive, got {}", max_frame_dt);

        Self {
            collector: EventCollector::new(receiver),
            systems: GlobalSystems::new(),
            context: GlobalContext::new(width, height),
            max_frame_dt,
        }
    }

    /// Runs game setup (bindings, scene registration, first scene).
    ///
    /// Scene requests queued during setup are applied before returning.
    ///
    /// # Errors
    ///
    /// Whatever `setup` returns, typically a failed initial `set_scene`.
    pub fn init<F>(&mut self, setup: F) -> Result<(), SceneError>
    where
        F: FnOnce(&mut GlobalSystems<S, A>, &mut GlobalContext<S, A>) -> Result<(), SceneError>,
    {
        setup(&mut self.systems, &mut self.context)?;
        self.systems.scene_manager.process_requests(&mut self.context);

        match self.systems.scene_manager.active_key() {
            Some(key) => info!("Frame loop ready, starting in scene {:?}", key),
            None => info!("Frame loop ready with no active scene"),
        }
        Ok(())
    }

    //--- Per-Frame --------------------------------------------------------

    /// Runs one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickControl {
        if self.collector.collect_frame() == TickControl::Exit {
            info!("Frame loop received shutdown signal");
            return TickControl::Exit;
        }

        let dt = dt.clamp(0.0, self.max_frame_dt);

        self.systems.update(
            &mut self.context,
            self.collector.batches(),
            self.collector.resize(),
            dt,
        );
        self.systems.draw(&self.context);

        TickControl::Continue
    }

    /// Exits the active scene and releases every scene.
    pub fn shutdown(&mut self) {
        debug!("Frame loop shutting down");
        self.systems.scene_manager.shutdown(&mut self.context);
    }

    //--- Accessors --------------------------------------------------------

    pub fn systems(&self) -> &GlobalSystems<S, A> {
        &self.systems
    }

    pub fn context(&self) -> &GlobalContext<S, A> {
        &self.context
    }

    /// Caption of the active scene, used as the window title.
    pub fn caption(&self) -> Option<&str> {
        self.systems.scene_manager.caption()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Bridges winit (OS-level events) with the engine's frame loop.
//
// Architecture:
// ```text
//  Main Thread
//  ┌──────────────────────────────────────────────────────────┐
//  │  Winit Event Loop                                        │
//  │   ↓                                                      │
//  │  InputProcessor ── winit → InputEvent, sticky modifiers  │
//  │   ↓                                                      │
//  │  InputBuffer ───── discrete: Vec / continuous: HashSet   │
//  │   ↓                                                      │
//  │  RedrawRequested (frame boundary)                        │
//  │   ├─ flush ──► Sender<PlatformEvent> ─┐                  │
//  │   └─ FrameLoop::tick(dt) ◄────────────┘ Receiver         │
//  │        ↓                                                 │
//  │      window title ◄─ active scene caption                │
//  └──────────────────────────────────────────────────────────┘
// ```
//
// Winit requires the main thread on macOS/iOS, so everything here runs on
// the thread that called `Engine::run()`.
//
// The channel is drained by the tick right after each flush, so it is
// empty between frames. Resizes are coalesced to one per frame, and an
// input batch that does not fit goes back into the buffer for the next
// frame; key releases are never dropped.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use std::time::Instant;

use crossbeam_channel::{Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::input::Action;
use crate::core::platform_bridge::{PlatformError, PlatformEvent, TickControl};
use crate::core::scene::SceneKey;
use crate::core::FrameLoop;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowConfig ========================================================

/// Initial window parameters.
#[derive(Debug, Clone)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== Platform ============================================================

/// Window owner, input aggregator and frame driver.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(..)` - no window yet
/// 2. **Execution**: `platform.run()` - blocks in the winit event loop
/// 3. **Frames**: each `RedrawRequested` flushes input and ticks the loop
/// 4. **Shutdown**: close request → `WindowClosed` → scenes torn down → exit
pub(crate) struct Platform<S: SceneKey, A: Action> {
    config: WindowConfig,

    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    buffer: InputBuffer,
    input_processor: InputProcessor,
    event_sender: Sender<PlatformEvent>,

    frame_loop: FrameLoop<S, A>,
    pending_resize: Option<(u32, u32)>,
    last_frame: Option<Instant>,
    title: String,
    exited: bool,
}

impl<S: SceneKey, A: Action> Platform<S, A> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        config: WindowConfig,
        frame_loop: FrameLoop<S, A>,
        event_sender: Sender<PlatformEvent>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        let title = config.title.clone();
        Self {
            config,
            window: None,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            event_sender,
            frame_loop,
            pending_resize: None,
            last_frame: None,
            title,
            exited: false,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// [`PlatformError`] if the event loop cannot be created or aborts.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))?;

        self.shutdown();
        Ok(())
    }

    //--- Frame ------------------------------------------------------------

    /// Flushes buffered input and runs one frame.
    fn advance_frame(&mut self) -> TickControl {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);

        self.flush_input_buffer();
        let control = self.frame_loop.tick(dt);

        if control == TickControl::Continue {
            self.sync_title();
        }
        control
    }

    /// Keeps only the latest size until the next frame.
    fn queue_resize(&mut self, width: u32, height: u32) {
        self.pending_resize = Some((width, height));
    }

    /// Sends the pending resize and buffered input to the frame loop.
    ///
    /// Whatever the channel cannot take stays queued for the next frame.
    fn flush_input_buffer(&mut self) {
        if let Some((width, height)) = self.pending_resize.take() {
            if self.try_deliver(PlatformEvent::Resized { width, height }).is_some() {
                debug!(target: "platform", "Event channel full, deferring resize");
                self.pending_resize.get_or_insert((width, height));
            }
        }

        if let Some((discrete, continuous)) = self.buffer.drain() {
            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete.len(),
                continuous.len()
            );
            if let Some(PlatformEvent::Inputs { discrete, continuous }) =
                self.try_deliver(PlatformEvent::Inputs { discrete, continuous })
            {
                debug!(
                    target: "platform::input",
                    "Event channel full, deferring {} input events",
                    discrete.len() + continuous.len()
                );
                self.buffer.restore(discrete, continuous);
            }
        }
    }

    /// Sends without blocking; a full channel hands the event back.
    fn try_deliver(&self, event: PlatformEvent) -> Option<PlatformEvent> {
        match self.event_sender.try_send(event) {
            Ok(()) => None,
            Err(TrySendError::Full(event)) => Some(event),
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "platform", "Event channel disconnected");
                None
            }
        }
    }

    /// Mirrors the active scene's caption into the window title.
    fn sync_title(&mut self) {
        let caption = self.frame_loop.caption().unwrap_or(self.config.title.as_str());
        if caption == self.title {
            return;
        }

        self.title = caption.to_string();
        if let Some(window) = &self.window {
            window.set_title(&self.title);
        }
    }

    fn shutdown(&mut self) {
        if self.exited {
            return;
        }
        self.exited = true;
        self.frame_loop.shutdown();
        info!(target: "platform", "Platform shut down");
    }

    /// Delivers the close to the frame loop, then tears everything down.
    fn close(&mut self, event_loop: &ActiveEventLoop) {
        if self.try_deliver(PlatformEvent::WindowClosed).is_some() {
            warn!(target: "platform", "Event channel full, close request not delivered");
        }
        if self.frame_loop.tick(0.0) != TickControl::Exit {
            warn!(target: "platform", "Frame loop did not observe the close request");
        }
        self.shutdown();
        event_loop.exit();
    }
}

//=== Winit Integration ===================================================

impl<S: SceneKey, A: Action> ApplicationHandler for Platform<S, A> {
    /// Creates the window on first resume (mobile may resume repeatedly).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );

                // Physical size may differ from the requested logical size
                self.queue_resize(size.width, size.height);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.close(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.close(event_loop);
            }

            WindowEvent::Resized(size) => {
                self.queue_resize(size.width, size.height);
            }

            WindowEvent::ModifiersChanged(state) => {
                self.input_processor.update_modifiers(state.state());
                trace!(
                    target: "platform::input",
                    "Modifiers changed: {:?}",
                    self.input_processor.modifiers()
                );
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.cursor(position.x, position.y);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.key(&key_event) {
                    Some(event) => self.buffer.push_discrete(event),
                    None => trace!(target: "platform::input", "Key ignored: {:?}", key_event.physical_key),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.mouse_button(button, state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => {
                if self.advance_frame() == TickControl::Exit {
                    self.shutdown();
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

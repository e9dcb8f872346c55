//=========================================================================
// Amana Engine - Library Root
//=========================================================================
//
// Public API surface of the Amana engine core: scenes, a 2D camera and
// an action-based input binder, driven by a winit window.
//
// Typical usage:
// ```no_run
// use amana_engine::prelude::*;
//
// EngineBuilder::<MyScene, &'static str>::new()
//     .build()
//     .init(|systems, ctx| { /* bindings, scenes */ })?
//     .run()?;
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the platform-independent systems (input, camera, scenes,
// frame loop). Most games only need the `prelude`.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit window and event loop; `engine` wires the
// builder, frame loop and platform together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};

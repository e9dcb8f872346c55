//=========================================================================
// Amana Demo
//=========================================================================
//
// Three-scene demo of the engine core:
//
//   Menu ──Enter──► Game ──Escape──► Menu
//     └────E─────► Editor ──Escape──► Menu
//
// Run with `RUST_LOG=debug` to watch scene switches and input.
//
//=========================================================================

mod editor;
mod gameplay;
mod menu;

//=== External Dependencies ===============================================

use std::error::Error;
use std::process::ExitCode;

use amana_engine::prelude::*;
use env_logger::{Builder, Env};
use log::error;

//=== Scene Keys ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoScene {
    Menu,
    Game,
    Editor,
}

impl SceneKey for DemoScene {}

/// Context type shared by the demo scenes.
pub type Ctx = GlobalContext<DemoScene, &'static str>;

//=== Entry Point =========================================================

fn main() -> ExitCode {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    EngineBuilder::<DemoScene, &'static str>::new()
        .with_title("Amana Demo")
        .with_window_size(1024, 768)
        .build()
        .init(|systems, ctx| {
            bind_actions(&mut ctx.input);

            let scenes = &mut systems.scene_manager;
            scenes.register_scene(DemoScene::Menu, menu::Menu);
            scenes.register_scene(DemoScene::Game, gameplay::Gameplay::default());
            scenes.register_scene(DemoScene::Editor, editor::Editor);
            scenes.set_scene(DemoScene::Menu, ctx)
        })?
        .run()?;

    Ok(())
}

fn bind_actions(input: &mut InputSystem<&'static str>) {
    input.bind_key("left", KeyCode::ArrowLeft);
    input.bind_key("left", KeyCode::KeyA);
    input.bind_key("right", KeyCode::ArrowRight);
    input.bind_key("right", KeyCode::KeyD);
    input.bind_key("up", KeyCode::ArrowUp);
    input.bind_key("up", KeyCode::KeyW);
    input.bind_key("down", KeyCode::ArrowDown);
    input.bind_key("down", KeyCode::KeyS);

    input.bind_key("confirm", KeyCode::Enter);
    input.bind_key("confirm", KeyCode::NumpadEnter);
    input.bind_key("back", KeyCode::Escape);
    input.bind_key("editor", KeyCode::KeyE);

    input.bind_key("zoom_out", KeyCode::KeyQ);
    input.bind_key("zoom_in", KeyCode::KeyE);
}

/// Unit direction from the four movement actions (screen axes, +y down).
pub fn movement(input: &InputSystem<&'static str>) -> Vec2 {
    let mut direction = Vec2::ZERO;
    if input.is_action_active("left") {
        direction.x -= 1.0;
    }
    if input.is_action_active("right") {
        direction.x += 1.0;
    }
    if input.is_action_active("up") {
        direction.y -= 1.0;
    }
    if input.is_action_active("down") {
        direction.y += 1.0;
    }
    direction.normalize_or_zero()
}

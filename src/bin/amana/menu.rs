//=========================================================================
// Menu Scene
//=========================================================================

use amana_engine::prelude::*;
use log::info;

use crate::{Ctx, DemoScene};

const DRIFT_SPEED: f32 = 40.0;

/// Title screen; the camera drifts slowly behind it.
pub struct Menu;

impl Scene<DemoScene, &'static str> for Menu {
    fn caption(&self) -> &str {
        "Amana - Main Menu"
    }

    fn on_enter(&mut self, ctx: &mut Ctx) {
        info!("Enter: play, E: editor");
        ctx.camera.set_object_to_follow(None);
        ctx.camera.set_auto_move(Vec2::new(1.0, 0.25), DRIFT_SPEED);
    }

    fn on_exit(&mut self, ctx: &mut Ctx) {
        ctx.camera.clear_auto_move();
    }

    fn update(&mut self, _dt: f32, ctx: &mut Ctx) {
        if ctx.input.is_action_pressed("confirm") {
            ctx.set_scene(DemoScene::Game);
        } else if ctx.input.is_action_pressed("editor") {
            ctx.set_scene(DemoScene::Editor);
        }
    }
}

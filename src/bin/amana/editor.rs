//=========================================================================
// Editor Scene
//=========================================================================
//
// Free camera: arrows pan, Q/E zoom, left click reports the world point
// under the cursor.
//
//=========================================================================

use amana_engine::prelude::*;
use log::info;

use crate::{Ctx, DemoScene};

const PAN_SPEED: f32 = 400.0;
const ZOOM_SPEED: f32 = 1.5;

pub struct Editor;

impl Scene<DemoScene, &'static str> for Editor {
    fn caption(&self) -> &str {
        "Amana - Editor"
    }

    fn on_enter(&mut self, ctx: &mut Ctx) {
        info!("Arrows: pan, Q/E: zoom, click: inspect, Escape: menu");
        ctx.camera.set_object_to_follow(None);
        ctx.camera.clear_auto_move();
    }

    fn update(&mut self, dt: f32, ctx: &mut Ctx) {
        if ctx.input.is_action_pressed("back") {
            ctx.set_scene(DemoScene::Menu);
            return;
        }

        let keys = ctx.input.state();
        let mut pan = Vec2::ZERO;
        if keys.is_key_down(KeyCode::ArrowLeft) {
            pan.x -= 1.0;
        }
        if keys.is_key_down(KeyCode::ArrowRight) {
            pan.x += 1.0;
        }
        if keys.is_key_down(KeyCode::ArrowUp) {
            pan.y -= 1.0;
        }
        if keys.is_key_down(KeyCode::ArrowDown) {
            pan.y += 1.0;
        }

        // Pan in screen units regardless of zoom
        if pan != Vec2::ZERO {
            let offset = pan.normalize() * PAN_SPEED * dt / ctx.camera.zoom();
            ctx.camera.move_by(offset);
        }

        let mut zoom = 0.0;
        if ctx.input.is_action_active("zoom_in") {
            zoom += ZOOM_SPEED * dt;
        }
        if ctx.input.is_action_active("zoom_out") {
            zoom -= ZOOM_SPEED * dt;
        }
        if zoom != 0.0 {
            ctx.camera.move_zoom(zoom);
        }
    }

    fn on_mouse_button_event(&mut self, event: &InputEvent, ctx: &mut Ctx) {
        if let InputEvent::MouseButtonDown { button: MouseButton::Left, .. } = event {
            let screen = ctx.input.state().mouse_position();
            let world = ctx.camera.screen_to_world(screen);
            info!("Clicked screen {:?} -> world {:?}", screen, world);
        }
    }
}

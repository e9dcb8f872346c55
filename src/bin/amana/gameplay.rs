//=========================================================================
// Gameplay Scene
//=========================================================================
//
// A single player square moved by the movement actions; the camera
// follows it with light smoothing.
//
//=========================================================================

use amana_engine::prelude::*;
use log::{debug, trace};

use crate::{movement, Ctx, DemoScene};

const PLAYER_SPEED: f32 = 220.0;
const PLAYER_SIZE: f32 = 32.0;
const FOLLOW_RATE: f32 = 8.0;

#[derive(Default)]
pub struct Gameplay {
    player: Option<ObjectHandle>,
}

impl Scene<DemoScene, &'static str> for Gameplay {
    fn caption(&self) -> &str {
        "Amana - Playing"
    }

    fn init(&mut self, ctx: &mut Ctx) {
        let player = RenderObject::new(Vec2::splat(-PLAYER_SIZE / 2.0), Vec2::splat(PLAYER_SIZE));
        let handle = ctx.objects.spawn(player);
        debug!("Spawned player {:?}", handle);
        self.player = Some(handle);
    }

    fn on_enter(&mut self, ctx: &mut Ctx) {
        ctx.camera.set_follow_rate(FOLLOW_RATE);
        ctx.camera.set_object_to_follow(self.player);
    }

    fn on_exit(&mut self, ctx: &mut Ctx) {
        ctx.camera.set_object_to_follow(None);
    }

    fn update(&mut self, dt: f32, ctx: &mut Ctx) {
        if ctx.input.is_action_pressed("back") {
            ctx.set_scene(DemoScene::Menu);
            return;
        }

        let step = movement(&ctx.input) * PLAYER_SPEED * dt;
        let Some(handle) = self.player else {
            return;
        };
        if let Some(player) = ctx.objects.get_mut(handle) {
            player.position += step;
        }
    }

    fn draw(&mut self, ctx: &Ctx) {
        let Some(player) = self.player.and_then(|handle| ctx.objects.get(handle)) else {
            return;
        };

        trace!(
            "player at {:?} (screen {:?}), view {:?}",
            player.position,
            ctx.camera.world_to_screen(player.position),
            ctx.camera.visible_world_rect(true)
        );
    }
}

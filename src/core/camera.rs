//=========================================================================
// Camera
//=========================================================================
//
// 2D viewport: position (world point at the viewport centre), zoom and
// pixel size, with a lazily rebuilt view matrix.
//
// Architecture:
//   mutators ──► dirty = true
//   update()  ──► dirty ? rebuild view : no-op
//   step(dt)  ──► follow target / auto-move ──► mutators
//
// View transform:
//   view = T(width/2, height/2) · S(zoom) · T(-position)
//
// Follow and auto-move do not compose: while a live follow target is set
// it drives the position and auto-move is suspended.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat4, Vec2, Vec3};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::objects::{ObjectArena, ObjectHandle};

//=== Constants ===========================================================

/// Smallest zoom factor the camera will store.
pub const MIN_ZOOM: f32 = 0.01;

//=== Rect ================================================================

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Inclusive of the min edge, exclusive of the max edge.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.y >= self.min.y && point.x < self.max.x && point.y < self.max.y
    }
}

//=== AutoMove ============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct AutoMove {
    direction: Vec2,
    speed: f32,
}

//=== Camera ==============================================================

/// 2D camera with cached view matrix.
///
/// ```
/// use amana_engine::core::camera::{Camera, MIN_ZOOM};
/// use glam::Vec2;
///
/// let mut camera = Camera::new(800, 600);
/// camera.set_position(Vec2::new(100.0, 50.0));
/// camera.set_zoom(0.0);
/// assert_eq!(camera.zoom(), MIN_ZOOM);
///
/// assert!(camera.is_dirty());
/// camera.update();
/// assert!(!camera.is_dirty());
/// ```
#[derive(Debug, Clone)]
pub struct Camera {
    width: u32,
    height: u32,
    zoom: f32,
    position: Vec2,
    dirty: bool,
    view: Mat4,

    follow: Option<ObjectHandle>,
    follow_rate: f32,
    auto_move: Option<AutoMove>,
}

impl Camera {
    //--- Construction -----------------------------------------------------

    /// Creates a camera for a viewport of `width` × `height` pixels,
    /// centred on the world origin at zoom 1.
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            width: width.max(1),
            height: height.max(1),
            zoom: 1.0,
            position: Vec2::ZERO,
            dirty: true,
            view: Mat4::IDENTITY,
            follow: None,
            follow_rate: f32::INFINITY,
            auto_move: None,
        };
        camera.update();
        camera
    }

    //--- Mutators ---------------------------------------------------------

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.dirty = true;
    }

    /// Translates the camera by `offset` world units.
    pub fn move_by(&mut self, offset: Vec2) {
        self.set_position(self.position + offset);
    }

    /// Sets the zoom factor, clamped to [`MIN_ZOOM`].
    pub fn set_zoom(&mut self, zoom: f32) {
        // NaN falls through max() to MIN_ZOOM as well
        self.zoom = zoom.max(MIN_ZOOM);
        self.dirty = true;
    }

    /// Adds `delta` to the zoom factor (then clamps).
    pub fn move_zoom(&mut self, delta: f32) {
        self.set_zoom(self.zoom + delta);
    }

    /// Adopts a new viewport size in pixels (each side at least 1).
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.dirty = true;
    }

    //--- Follow & Auto-Move -----------------------------------------------

    /// Follows `target` (or stops following with `None`).
    pub fn set_object_to_follow(&mut self, target: Option<ObjectHandle>) {
        debug!("Camera follow target set to {:?}", target);
        self.follow = target;
    }

    pub fn follow_target(&self) -> Option<ObjectHandle> {
        self.follow
    }

    /// How fast the camera closes in on its follow target, in 1/s.
    ///
    /// Each step covers `1 - e^(-rate·dt)` of the remaining distance.
    /// `f32::INFINITY` (the default) snaps onto the target every frame.
    pub fn set_follow_rate(&mut self, rate: f32) {
        self.follow_rate = if rate.is_nan() { f32::INFINITY } else { rate.max(0.0) };
    }

    /// Drifts the camera along `direction` at `speed` world units/second.
    pub fn set_auto_move(&mut self, direction: Vec2, speed: f32) {
        self.auto_move = Some(AutoMove {
            direction: direction.normalize_or_zero(),
            speed,
        });
    }

    pub fn clear_auto_move(&mut self) {
        self.auto_move = None;
    }

    pub fn is_auto_moving(&self) -> bool {
        self.auto_move.is_some()
    }

    /// Advances follow / auto-move by `dt` seconds.
    ///
    /// A follow target whose handle no longer resolves is dropped (with a
    /// single warning) and auto-move resumes.
    pub fn step(&mut self, dt: f32, objects: &ObjectArena) {
        if let Some(handle) = self.follow {
            match objects.get(handle) {
                Some(object) => {
                    let target = object.center();
                    let next = if self.follow_rate.is_infinite() {
                        target
                    } else {
                        let t = 1.0 - (-self.follow_rate * dt).exp();
                        self.position.lerp(target, t)
                    };
                    if next != self.position {
                        self.set_position(next);
                    }
                    return;
                }
                None => {
                    warn!("Camera follow target {:?} no longer exists; following stopped", handle);
                    self.follow = None;
                }
            }
        }

        if let Some(auto) = self.auto_move {
            let offset = auto.direction * auto.speed * dt;
            if offset != Vec2::ZERO {
                self.move_by(offset);
            }
        }
    }

    /// [`step`](Self::step) followed by [`update`](Self::update).
    pub fn tick(&mut self, dt: f32, objects: &ObjectArena) {
        self.step(dt, objects);
        self.update();
    }

    //--- View Matrix ------------------------------------------------------

    /// Rebuilds the view matrix if any mutator ran since the last call.
    pub fn update(&mut self) {
        if !self.dirty {
            return;
        }

        let half = self.half_viewport();
        self.view = Mat4::from_translation(Vec3::new(half.x, half.y, 0.0))
            * Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0))
            * Mat4::from_translation(Vec3::new(-self.position.x, -self.position.y, 0.0));
        self.dirty = false;
    }

    /// Cached view matrix (stale while [`is_dirty`](Self::is_dirty)).
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    //--- Queries ----------------------------------------------------------

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Viewport size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// World-space rectangle currently on screen.
    ///
    /// With `snap`, the rectangle grows outward to whole world units so
    /// tile grids drawn from it have no sub-pixel seams at the edges.
    pub fn visible_world_rect(&self, snap: bool) -> Rect {
        let half = self.half_viewport() / self.zoom;
        let rect = Rect {
            min: self.position - half,
            max: self.position + half,
        };

        if snap {
            Rect { min: rect.min.floor(), max: rect.max.ceil() }
        } else {
            rect
        }
    }

    /// Converts a world point to window pixels.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.position) * self.zoom + self.half_viewport()
    }

    /// Converts window pixels to a world point.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.half_viewport()) / self.zoom + self.position
    }

    fn half_viewport(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * 0.5
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::objects::RenderObject;

    fn clean_camera() -> Camera {
        let mut camera = Camera::new(800, 600);
        camera.update();
        camera
    }

    fn project(camera: &Camera, world: Vec2) -> Vec2 {
        camera.view_matrix().transform_point3(world.extend(0.0)).truncate()
    }

    //=====================================================================
    // Dirty Flag
    //=====================================================================

    #[test]
    fn new_camera_is_clean() {
        assert!(!Camera::new(800, 600).is_dirty());
    }

    #[test]
    fn every_mutator_marks_dirty() {
        let mutators: [fn(&mut Camera); 5] = [
            |c| c.set_position(Vec2::new(1.0, 1.0)),
            |c| c.move_by(Vec2::new(1.0, 0.0)),
            |c| c.set_zoom(2.0),
            |c| c.move_zoom(0.5),
            |c| c.on_resize(1024, 768),
        ];

        for mutate in mutators {
            let mut camera = clean_camera();
            mutate(&mut camera);
            assert!(camera.is_dirty());
            camera.update();
            assert!(!camera.is_dirty());
        }
    }

    #[test]
    fn update_without_mutation_is_idempotent() {
        let mut camera = clean_camera();
        camera.set_position(Vec2::new(40.0, -20.0));
        camera.set_zoom(3.0);

        camera.update();
        let first = camera.view_matrix();
        camera.update();

        assert_eq!(camera.view_matrix(), first);
        assert!(!camera.is_dirty());
    }

    #[test]
    fn view_matrix_is_not_rebuilt_until_update() {
        let mut camera = clean_camera();
        let before = camera.view_matrix();

        camera.set_position(Vec2::new(10.0, 10.0));
        assert_eq!(camera.view_matrix(), before, "Cached until update()");

        camera.update();
        assert_ne!(camera.view_matrix(), before);
    }

    //=====================================================================
    // Zoom
    //=====================================================================

    #[test]
    fn zoom_clamps_to_floor() {
        let mut camera = clean_camera();
        for z in [0.01, 0.005, 0.0, -3.0, f32::NAN] {
            camera.set_zoom(z);
            assert_eq!(camera.zoom(), MIN_ZOOM, "set_zoom({z})");
        }

        camera.set_zoom(0.5);
        camera.move_zoom(-10.0);
        assert_eq!(camera.zoom(), MIN_ZOOM);
    }

    //=====================================================================
    // Transforms
    //=====================================================================

    #[test]
    fn view_maps_position_to_viewport_centre() {
        let mut camera = clean_camera();
        camera.set_position(Vec2::new(100.0, 50.0));
        camera.set_zoom(2.0);
        camera.update();

        assert_eq!(project(&camera, Vec2::new(100.0, 50.0)), Vec2::new(400.0, 300.0));
        assert_eq!(project(&camera, Vec2::new(110.0, 50.0)), Vec2::new(420.0, 300.0));
    }

    #[test]
    fn screen_world_round_trip_matches_view() {
        let mut camera = clean_camera();
        camera.set_position(Vec2::new(-30.0, 12.0));
        camera.set_zoom(0.5);
        camera.update();

        let world = Vec2::new(5.0, 7.0);
        let screen = camera.world_to_screen(world);
        assert_eq!(screen, project(&camera, world));
        assert!(camera.screen_to_world(screen).abs_diff_eq(world, 1e-4));
    }

    #[test]
    fn visible_rect_scales_with_zoom() {
        let mut camera = clean_camera();
        camera.set_zoom(2.0);

        let rect = camera.visible_world_rect(false);
        assert_eq!(rect.min, Vec2::new(-200.0, -150.0));
        assert_eq!(rect.max, Vec2::new(200.0, 150.0));
        assert!(rect.contains(Vec2::ZERO));
    }

    #[test]
    fn snapped_rect_grows_to_whole_units() {
        let mut camera = Camera::new(10, 10);
        camera.set_position(Vec2::new(0.25, 0.75));

        let exact = camera.visible_world_rect(false);
        let snapped = camera.visible_world_rect(true);

        assert_eq!(exact.min, Vec2::new(-4.75, -4.25));
        assert_eq!(snapped.min, Vec2::new(-5.0, -5.0));
        assert_eq!(snapped.max, Vec2::new(6.0, 6.0));
        assert_eq!(snapped.width(), 11.0);
    }

    #[test]
    fn resize_clamps_to_one_pixel() {
        let mut camera = clean_camera();
        camera.on_resize(0, 0);
        assert_eq!(camera.size(), (1, 1));
    }

    //=====================================================================
    // Follow & Auto-Move
    //=====================================================================

    #[test]
    fn follow_snaps_to_target_centre() {
        let mut objects = ObjectArena::new();
        let player = objects.spawn(RenderObject::new(Vec2::new(100.0, 100.0), Vec2::new(20.0, 40.0)));

        let mut camera = clean_camera();
        camera.set_object_to_follow(Some(player));
        camera.tick(1.0 / 60.0, &objects);

        assert_eq!(camera.position(), Vec2::new(110.0, 120.0));
        assert!(!camera.is_dirty());
    }

    #[test]
    fn smooth_follow_closes_part_of_the_gap() {
        let mut objects = ObjectArena::new();
        let target = objects.spawn(RenderObject::new(Vec2::new(100.0, 0.0), Vec2::ZERO));

        let mut camera = clean_camera();
        camera.set_follow_rate(2.0);
        camera.set_object_to_follow(Some(target));
        camera.step(0.1, &objects);

        let x = camera.position().x;
        assert!(x > 0.0 && x < 100.0, "x = {x}");
    }

    #[test]
    fn stationary_follow_keeps_camera_clean() {
        let mut objects = ObjectArena::new();
        let target = objects.spawn(RenderObject::new(Vec2::ZERO, Vec2::ZERO));

        let mut camera = clean_camera();
        camera.set_object_to_follow(Some(target));
        camera.step(0.016, &objects);

        assert!(!camera.is_dirty(), "No movement, no rebuild");
    }

    #[test]
    fn dead_follow_target_is_dropped() {
        let mut objects = ObjectArena::new();
        let target = objects.spawn(RenderObject::new(Vec2::new(50.0, 50.0), Vec2::ZERO));

        let mut camera = clean_camera();
        camera.set_object_to_follow(Some(target));
        objects.despawn(target);

        camera.step(0.016, &objects);

        assert_eq!(camera.follow_target(), None);
        assert_eq!(camera.position(), Vec2::ZERO);
    }

    #[test]
    fn auto_move_drifts_at_constant_speed() {
        let objects = ObjectArena::new();
        let mut camera = clean_camera();
        camera.set_auto_move(Vec2::new(3.0, 0.0), 10.0);

        camera.tick(0.5, &objects);
        camera.tick(0.5, &objects);
        assert_eq!(camera.position(), Vec2::new(10.0, 0.0));

        camera.clear_auto_move();
        camera.tick(1.0, &objects);
        assert_eq!(camera.position(), Vec2::new(10.0, 0.0));
        assert!(!camera.is_auto_moving());
    }

    #[test]
    fn follow_suspends_auto_move() {
        let mut objects = ObjectArena::new();
        let target = objects.spawn(RenderObject::new(Vec2::new(-40.0, 0.0), Vec2::ZERO));

        let mut camera = clean_camera();
        camera.set_auto_move(Vec2::X, 100.0);
        camera.set_object_to_follow(Some(target));
        camera.step(1.0, &objects);
        assert_eq!(camera.position(), Vec2::new(-40.0, 0.0));

        objects.despawn(target);
        camera.step(1.0, &objects);
        assert_eq!(camera.position(), Vec2::new(60.0, 0.0), "Auto-move resumes");
    }
}

use std::time::Duration;

use ar_cube_placement::engine::tracking::{
    SurfaceId, SurfacePose, SurfaceProvider, SurfaceRaycastHit, SurfacesChanged, TouchQuery,
    TrackedSurface,
};
use ar_cube_placement::tools::cube_lifecycle::{
    CubeLifecycle, CubeMotion, CubeMoveCommand, CubeVisualState, InstallableCube, MoveDirection,
    PlacementControls,
};
use ar_cube_placement::tools::touch_router::{DetectionEvent, FingerDown};
use ar_cube_placement::{
    CubePlacementPlugin, PlacementSettings, SurfaceTracking, TouchCamera,
};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use bevy::window::{PrimaryWindow, WindowResolution};

const FRAME: Duration = Duration::from_millis(100);
const DELETE_AFTER_SECS: f32 = 0.5;
const SCREEN_CENTRE: Vec2 = Vec2::new(320.0, 240.0);

/// Tracker that answers every hit-test with the same hits and never changes.
struct FixedSurfaces {
    hits: Vec<SurfaceRaycastHit>,
}

impl SurfaceProvider for FixedSurfaces {
    fn raycast(&self, _query: &TouchQuery) -> Vec<SurfaceRaycastHit> {
        self.hits.clone()
    }
}

fn hit_at(position: Vec3, within_polygon: bool) -> SurfaceRaycastHit {
    SurfaceRaycastHit {
        pose: SurfacePose::from_position(position),
        distance: 1.0,
        surface: SurfaceId(1),
        within_polygon,
    }
}

fn app_with_camera(hits: Vec<SurfaceRaycastHit>, camera: impl Bundle) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(PlacementSettings {
            delete_touch_duration_secs: DELETE_AFTER_SECS,
            ..default()
        })
        .add_plugins(CubePlacementPlugin);

    let camera = app.world_mut().spawn(camera).id();
    app.insert_resource(TouchCamera(camera))
        .insert_resource(SurfaceTracking::new(FixedSurfaces { hits }));

    app.update();
    app
}

fn app_with_hits(hits: Vec<SurfaceRaycastHit>) -> App {
    app_with_camera(hits, Camera::default())
}

/// Camera 2m above the origin looking straight down through a 640x480 window, so a tap
/// at the screen centre casts a ray onto the origin.
fn overhead_app(hits: Vec<SurfaceRaycastHit>) -> App {
    let mut app = app_with_camera(
        hits,
        (
            Camera::default(),
            Projection::Perspective(default()),
            Transform::from_xyz(0.0, 2.0, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z),
        ),
    );
    app.world_mut().spawn((
        Window {
            resolution: WindowResolution::new(640.0, 480.0),
            ..default()
        },
        PrimaryWindow,
    ));
    app
}

fn headless_app() -> App {
    app_with_hits(Vec::new())
}

fn tap(app: &mut App, finger_index: usize) {
    app.world_mut().send_event(FingerDown {
        finger_index,
        screen_position: SCREEN_CENTRE,
    });
    app.update();
}

fn detect(app: &mut App, event: DetectionEvent) {
    app.world_mut().send_event(event);
    app.update();
}

fn place_at(app: &mut App, position: Vec3) -> Entity {
    detect(app, DetectionEvent::SurfaceHit(SurfacePose::from_position(position)));
    *app.world()
        .resource::<CubeLifecycle>()
        .cubes()
        .last()
        .expect("cube was placed")
}

fn advance(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn detections(app: &App) -> Vec<DetectionEvent> {
    app.world()
        .resource::<Events<DetectionEvent>>()
        .iter_current_update_events()
        .copied()
        .collect()
}

fn lifecycle(app: &App) -> &CubeLifecycle {
    app.world().resource::<CubeLifecycle>()
}

fn exists(app: &App, entity: Entity) -> bool {
    app.world().entities().contains(entity)
}

fn visual_state(app: &App, cube: Entity) -> CubeVisualState {
    app.world().get::<InstallableCube>(cube).unwrap().state
}

fn translation(app: &App, cube: Entity) -> Vec3 {
    app.world().get::<Transform>(cube).unwrap().translation
}

#[test]
fn primary_tap_on_surface_places_a_cube() {
    let mut app = app_with_hits(vec![hit_at(Vec3::new(1.0, 0.0, 1.0), true)]);

    tap(&mut app, 0);

    let events = detections(&app);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], DetectionEvent::RawTouch);
    assert!(matches!(events[1], DetectionEvent::SurfaceHit(_)));

    assert_eq!(lifecycle(&app).len(), 1);
    assert!(lifecycle(&app).controls_visible());
    let cube = lifecycle(&app).cubes()[0];
    assert_eq!(translation(&app, cube), Vec3::new(1.0, 0.0, 1.0));
    assert_eq!(visual_state(&app, cube), CubeVisualState::Normal);
}

#[test]
fn secondary_fingers_produce_nothing() {
    let mut app = app_with_hits(vec![hit_at(Vec3::ZERO, true)]);

    tap(&mut app, 1);
    tap(&mut app, 3);

    assert!(detections(&app).is_empty());
    assert!(lifecycle(&app).is_empty());
    assert!(!lifecycle(&app).controls_visible());
}

#[test]
fn tap_outside_any_surface_only_reports_the_raw_touch() {
    let mut app = app_with_hits(vec![hit_at(Vec3::new(4.0, 0.0, 4.0), false)]);

    tap(&mut app, 0);

    assert_eq!(detections(&app), vec![DetectionEvent::RawTouch]);
    assert!(lifecycle(&app).is_empty());
}

#[test]
fn every_surface_tap_adds_exactly_one_cube() {
    let mut app = app_with_hits(vec![hit_at(Vec3::ZERO, true), hit_at(Vec3::X, true)]);

    for expected in 1..=3 {
        tap(&mut app, 0);
        assert_eq!(lifecycle(&app).len(), expected);
        assert!(lifecycle(&app).controls_visible());
    }
}

#[test]
fn placed_cube_is_deleted_once_the_deadline_elapses() {
    let mut app = headless_app();
    let cube = place_at(&mut app, Vec3::new(1.0, 0.0, 1.0));
    assert!(lifecycle(&app).controls_visible());

    detect(&mut app, DetectionEvent::ObjectHit(cube));
    assert_eq!(visual_state(&app, cube), CubeVisualState::MarkedForDeletion);

    advance(&mut app, 3);
    assert!(exists(&app, cube));
    assert_eq!(lifecycle(&app).len(), 1);

    advance(&mut app, 4);
    assert!(!exists(&app, cube));
    assert!(lifecycle(&app).is_empty());
    assert!(!lifecycle(&app).controls_visible());
}

#[test]
fn raw_touch_before_deadline_cancels_and_mark_stays() {
    let mut app = headless_app();
    let cube = place_at(&mut app, Vec3::ZERO);

    detect(&mut app, DetectionEvent::ObjectHit(cube));
    advance(&mut app, 2);
    detect(&mut app, DetectionEvent::RawTouch);
    advance(&mut app, 10);

    assert!(exists(&app, cube));
    assert_eq!(lifecycle(&app).len(), 1);
    assert!(lifecycle(&app).pending().is_none());
    assert_eq!(visual_state(&app, cube), CubeVisualState::MarkedForDeletion);
}

#[test]
fn deleting_one_of_two_keeps_controls_visible() {
    let mut app = headless_app();
    let a = place_at(&mut app, Vec3::ZERO);
    let b = place_at(&mut app, Vec3::X);

    detect(&mut app, DetectionEvent::ObjectHit(a));
    advance(&mut app, 10);

    assert!(!exists(&app, a));
    assert_eq!(lifecycle(&app).cubes(), &[b]);
    assert!(lifecycle(&app).controls_visible());
}

#[test]
fn arming_a_second_cube_replaces_the_first_deletion() {
    let mut app = headless_app();
    let a = place_at(&mut app, Vec3::ZERO);
    let b = place_at(&mut app, Vec3::X);

    detect(&mut app, DetectionEvent::ObjectHit(a));
    advance(&mut app, 2);
    detect(&mut app, DetectionEvent::ObjectHit(b));

    assert_eq!(lifecycle(&app).pending().map(|p| p.target()), Some(b));
    assert_eq!(visual_state(&app, a), CubeVisualState::MarkedForDeletion);
    assert_eq!(visual_state(&app, b), CubeVisualState::MarkedForDeletion);

    advance(&mut app, 10);

    assert!(exists(&app, a));
    assert!(!exists(&app, b));
    assert_eq!(lifecycle(&app).cubes(), &[a]);
}

#[test]
fn only_the_latest_deletion_is_cancellable() {
    let mut app = headless_app();
    let a = place_at(&mut app, Vec3::ZERO);
    let b = place_at(&mut app, Vec3::X);

    detect(&mut app, DetectionEvent::ObjectHit(a));
    detect(&mut app, DetectionEvent::ObjectHit(b));
    detect(&mut app, DetectionEvent::RawTouch);
    advance(&mut app, 10);

    assert!(exists(&app, a));
    assert!(exists(&app, b));
    assert_eq!(lifecycle(&app).len(), 2);
}

#[test]
fn raw_touch_in_the_same_gesture_runs_before_the_new_arm() {
    let mut app = headless_app();
    let a = place_at(&mut app, Vec3::ZERO);
    let b = place_at(&mut app, Vec3::X);

    detect(&mut app, DetectionEvent::ObjectHit(a));

    // One gesture: raw touch then object hit, delivered in the same frame.
    app.world_mut().send_event(DetectionEvent::RawTouch);
    app.world_mut().send_event(DetectionEvent::ObjectHit(b));
    app.update();

    assert_eq!(lifecycle(&app).pending().map(|p| p.target()), Some(b));
    advance(&mut app, 10);
    assert!(exists(&app, a));
    assert!(!exists(&app, b));
}

#[test]
fn tap_on_something_that_is_not_a_cube_is_ignored() {
    let mut app = headless_app();
    let cube = place_at(&mut app, Vec3::ZERO);
    let stranger = app.world_mut().spawn(Transform::default()).id();

    detect(&mut app, DetectionEvent::ObjectHit(stranger));
    advance(&mut app, 10);

    assert!(lifecycle(&app).pending().is_none());
    assert!(exists(&app, stranger));
    assert!(exists(&app, cube));
}

#[test]
fn cube_removed_elsewhere_is_not_destroyed_twice() {
    let mut app = headless_app();
    let cube = place_at(&mut app, Vec3::ZERO);

    detect(&mut app, DetectionEvent::ObjectHit(cube));
    app.world_mut().despawn(cube);
    advance(&mut app, 10);

    assert!(lifecycle(&app).is_empty());
    assert!(!lifecycle(&app).controls_visible());
}

#[test]
fn surface_update_snaps_heights_to_the_first_updated_surface() {
    let mut app = headless_app();
    let near = place_at(&mut app, Vec3::new(0.0, 0.0, 0.0));
    let far = place_at(&mut app, Vec3::new(5.0, 0.0, -3.0));

    // S2 sits right under `far`, yet only S1's height is used.
    app.world_mut().send_event(SurfacesChanged {
        updated: vec![
            TrackedSurface::new(1, Vec3::new(-10.0, 0.3, 0.0), Vec2::ONE),
            TrackedSurface::new(2, Vec3::new(5.0, -0.7, -3.0), Vec2::ONE),
        ],
        ..default()
    });
    app.update();

    assert_eq!(translation(&app, near), Vec3::new(0.0, 0.3, 0.0));
    assert_eq!(translation(&app, far), Vec3::new(5.0, 0.3, -3.0));
}

#[test]
fn surface_change_without_updates_leaves_heights_alone() {
    let mut app = headless_app();
    let cube = place_at(&mut app, Vec3::new(0.5, 0.1, 0.5));

    app.world_mut().send_event(SurfacesChanged {
        added: vec![TrackedSurface::new(3, Vec3::new(0.0, 2.0, 0.0), Vec2::ONE)],
        ..default()
    });
    app.update();

    assert_eq!(translation(&app, cube), Vec3::new(0.5, 0.1, 0.5));
}

#[test]
fn move_commands_fan_out_to_every_cube() {
    let mut app = headless_app();
    let a = place_at(&mut app, Vec3::ZERO);
    let b = place_at(&mut app, Vec3::Z);

    app.world_mut().send_event(CubeMoveCommand::StartRight);
    advance(&mut app, 3);

    for cube in [a, b] {
        let motion = app.world().get::<CubeMotion>(cube).unwrap();
        assert_eq!(motion.direction, Some(MoveDirection::Right));
    }
    assert!(translation(&app, a).x > 0.0);
    assert!(translation(&app, b).x > 0.0);

    app.world_mut().send_event(CubeMoveCommand::Stop);
    app.update();
    let stopped_at = translation(&app, a);
    advance(&mut app, 3);
    assert_eq!(translation(&app, a), stopped_at);
}

#[test]
fn repeated_stop_without_move_is_a_no_op() {
    let mut app = headless_app();
    let cube = place_at(&mut app, Vec3::new(0.2, 0.0, 0.2));

    for _ in 0..3 {
        app.world_mut().send_event(CubeMoveCommand::Stop);
        app.update();
    }

    assert_eq!(app.world().get::<CubeMotion>(cube).unwrap().direction, None);
    assert_eq!(translation(&app, cube), Vec3::new(0.2, 0.0, 0.2));
}

#[test]
fn controls_follow_the_collection() {
    let mut app = headless_app();
    let controls = app
        .world_mut()
        .spawn((PlacementControls, Visibility::Hidden))
        .id();

    let cube = place_at(&mut app, Vec3::ZERO);
    app.update();
    assert_eq!(app.world().get::<Visibility>(controls), Some(&Visibility::Inherited));

    detect(&mut app, DetectionEvent::ObjectHit(cube));
    advance(&mut app, 10);
    assert_eq!(app.world().get::<Visibility>(controls), Some(&Visibility::Hidden));
}

#[test]
fn removing_the_manager_unsubscribes_it() {
    let mut app = app_with_hits(vec![hit_at(Vec3::ZERO, true)]);
    app.world_mut().remove_resource::<CubeLifecycle>();

    tap(&mut app, 0);
    detect(&mut app, DetectionEvent::SurfaceHit(SurfacePose::from_position(Vec3::ONE)));

    let mut cubes = app.world_mut().query::<&InstallableCube>();
    assert_eq!(cubes.iter(app.world()).count(), 0);
}

#[test]
fn second_tap_on_a_placed_cube_arms_its_deletion() {
    let mut app = overhead_app(vec![hit_at(Vec3::ZERO, true)]);

    tap(&mut app, 0);
    assert_eq!(lifecycle(&app).len(), 1);
    let cube = lifecycle(&app).cubes()[0];

    tap(&mut app, 0);

    assert_eq!(
        detections(&app),
        vec![DetectionEvent::RawTouch, DetectionEvent::ObjectHit(cube)]
    );
    assert_eq!(lifecycle(&app).len(), 1);
    assert_eq!(visual_state(&app, cube), CubeVisualState::MarkedForDeletion);
    assert_eq!(lifecycle(&app).pending().map(|p| p.target()), Some(cube));

    advance(&mut app, 10);
    assert!(!exists(&app, cube));
    assert!(!lifecycle(&app).controls_visible());
}

#[test]
fn cube_taps_fall_through_until_a_surface_was_found() {
    let mut app = overhead_app(vec![hit_at(Vec3::ZERO, true)]);
    // Placed without a routed surface tap, so the object hit-test is still gated off.
    let cube = place_at(&mut app, Vec3::ZERO);

    tap(&mut app, 0);

    let events = detections(&app);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1], DetectionEvent::SurfaceHit(_)));
    assert_eq!(lifecycle(&app).len(), 2);
    assert_eq!(visual_state(&app, cube), CubeVisualState::Normal);
}

#[test]
fn tap_beside_a_cube_does_not_hit_it() {
    let mut app = overhead_app(vec![hit_at(Vec3::new(1.0, 0.0, 0.0), true)]);

    tap(&mut app, 0);
    let cube = lifecycle(&app).cubes()[0];
    // The first cube sits at x = 1, well away from the centre ray.
    assert_eq!(translation(&app, cube).x, 1.0);

    tap(&mut app, 0);

    let events = detections(&app);
    assert!(matches!(events[1], DetectionEvent::SurfaceHit(_)));
    assert_eq!(visual_state(&app, cube), CubeVisualState::Normal);
}

#[test]
#[should_panic(expected = "requires a TouchCamera resource")]
fn missing_touch_camera_fails_at_startup() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(CubePlacementPlugin)
        .insert_resource(SurfaceTracking::new(FixedSurfaces { hits: Vec::new() }));

    app.update();
}

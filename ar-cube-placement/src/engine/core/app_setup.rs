use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;

use crate::CubePlacementPlugin;
use crate::engine::camera::TouchCamera;
use crate::engine::scene::{spawn_surface_visual, sync_surface_visuals};
use crate::engine::settings::PlacementSettingsPlugin;
use crate::engine::tracking::{SimulatedSurfaces, SurfaceTracking, TrackedSurface};
use crate::tools::cube_lifecycle::{ControlsUiPlugin, CubeRenderingPlugin};

use super::window_config::create_window_config;

// The simulated floor is first detected slightly high and settles onto y = 0.
const SIMULATED_FLOOR_INITIAL_HEIGHT: f32 = 0.08;
const SIMULATED_FLOOR_HALF_EXTENT: f32 = 1.0;
const SIMULATED_SETTLE_RATE: f32 = 0.02;
const AR_CAMERA_FAR_CLIP: f32 = 20.0;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(PlacementSettingsPlugin::default())
        .add_plugins(CubePlacementPlugin)
        .add_plugins(CubeRenderingPlugin)
        .add_systems(Startup, setup_scene)
        .add_systems(Update, sync_surface_visuals);

    #[cfg(not(target_arch = "wasm32"))]
    app.add_plugins(ControlsUiPlugin);

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    info!("=== AR CUBE PLACEMENT (simulated surfaces) ===");
    info!("Tap the floor to place a cube, tap a cube to delete it");

    let camera = commands
        .spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                far: AR_CAMERA_FAR_CLIP,
                ..default()
            }),
            Transform::from_xyz(0.0, 1.4, 1.8).looking_at(Vec3::ZERO, Vec3::Y),
            Name::new("ArCamera"),
        ))
        .id();
    commands.insert_resource(TouchCamera(camera));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));

    let floor = TrackedSurface::new(
        1,
        Vec3::new(0.0, SIMULATED_FLOOR_INITIAL_HEIGHT, 0.0),
        Vec2::splat(SIMULATED_FLOOR_HALF_EXTENT),
    );
    spawn_surface_visual(&mut commands, &mut meshes, &mut materials, &floor);
    commands.insert_resource(SurfaceTracking::new(
        SimulatedSurfaces::new()
            .with_settle_rate(SIMULATED_SETTLE_RATE)
            .with_surface(floor, 0.0),
    ));
}

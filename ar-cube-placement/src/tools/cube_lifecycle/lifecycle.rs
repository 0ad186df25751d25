use std::time::Duration;

use bevy::prelude::*;

use crate::engine::settings::PlacementSettings;
use crate::engine::tracking::SurfacesChanged;
use crate::tools::touch_router::{DetectionEvent, HitBounds, HitTestLayers};

use super::motion::CubeMotion;
use super::presentation::CubePrefab;
use super::state::{CubeLifecycle, CubeVisualState, InstallableCube};

/// Spawns a cube at `position`. Without a prefab the cube has no mesh, which is enough
/// for hit-testing and bookkeeping.
pub fn spawn_cube(
    commands: &mut Commands,
    position: Vec3,
    settings: &PlacementSettings,
    prefab: Option<&CubePrefab>,
) -> Entity {
    let mut cube = commands.spawn((
        Name::new("InstallableCube"),
        Transform::from_translation(position).with_scale(Vec3::splat(settings.cube_size)),
        Visibility::default(),
        InstallableCube::default(),
        CubeMotion::default(),
        // Unit box in local space, scaled with the transform.
        HitBounds(Vec3::ONE),
        HitTestLayers(settings.object_layers),
    ));
    if let Some(prefab) = prefab {
        cube.insert((
            Mesh3d(prefab.mesh.clone()),
            MeshMaterial3d(prefab.normal_material.clone()),
        ));
    }
    cube.id()
}

// Runs before new detections so a timer armed this frame starts counting next frame.
pub fn tick_pending_deletion(
    time: Res<Time>,
    mut lifecycle: ResMut<CubeLifecycle>,
    mut commands: Commands,
) {
    let Some(target) = lifecycle.tick(time.delta()) else {
        return;
    };
    if !lifecycle.remove(target) {
        debug!("Deletion deadline for {} elapsed after it was removed", target);
        return;
    }
    if let Ok(mut cube) = commands.get_entity(target) {
        cube.despawn();
    }
    info!("Cube {} deleted, {} remaining", target, lifecycle.len());
    if !lifecycle.controls_visible() {
        info!("Last cube removed, hiding controls");
    }
}

pub fn handle_detection_events(
    mut detections: EventReader<DetectionEvent>,
    mut lifecycle: ResMut<CubeLifecycle>,
    settings: Res<PlacementSettings>,
    prefab: Option<Res<CubePrefab>>,
    mut cubes: Query<&mut InstallableCube>,
    mut commands: Commands,
) {
    for detection in detections.read() {
        match *detection {
            DetectionEvent::RawTouch => {
                if let Some(target) = lifecycle.cancel_pending() {
                    info!("Deletion of cube {} cancelled", target);
                }
            }
            DetectionEvent::ObjectHit(target) => {
                if !lifecycle.contains(target) {
                    warn!("Ignoring tap on {}: not a placed cube", target);
                    continue;
                }
                if let Ok(mut cube) = cubes.get_mut(target) {
                    cube.state = CubeVisualState::MarkedForDeletion;
                }
                let delay = Duration::try_from_secs_f32(settings.delete_touch_duration_secs)
                    .unwrap_or_default();
                if let Some(replaced) = lifecycle.arm_deletion(target, delay) {
                    debug!("Deletion of cube {} replaced by {}", replaced, target);
                }
                info!("Cube {} marked for deletion in {:?}", target, delay);
            }
            DetectionEvent::SurfaceHit(pose) => {
                let cube = spawn_cube(&mut commands, pose.position, &settings, prefab.as_deref());
                lifecycle.register(cube);
                info!("Cube {} placed at {}", cube, pose.position);
            }
        }
    }
}

/// Snaps every cube to the height of the first updated surface.
pub fn sync_cube_heights(
    mut changes: EventReader<SurfacesChanged>,
    lifecycle: Res<CubeLifecycle>,
    mut transforms: Query<&mut Transform, With<InstallableCube>>,
) {
    for change in changes.read() {
        let Some(surface) = change.updated.first() else {
            continue;
        };
        let height = surface.height();
        for cube in lifecycle.cubes() {
            if let Ok(mut xf) = transforms.get_mut(*cube) {
                xf.translation.y = height;
            }
        }
        debug!(
            "Synced {} cubes to surface {:?} at y={}",
            lifecycle.len(),
            surface.id,
            height
        );
    }
}

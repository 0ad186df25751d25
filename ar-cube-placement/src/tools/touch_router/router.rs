use bevy::ecs::error::BevyError;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::layers::PRIMARY_FINGER_INDEX;

use crate::engine::camera::{TouchCamera, far_clip_distance, screen_ray};
use crate::engine::error::PlacementError;
use crate::engine::settings::PlacementSettings;
use crate::engine::tracking::{SurfaceRaycastHit, SurfaceTracking, TouchQuery};

use super::events::{DetectionEvent, FingerDown};
use super::ray::{HitBounds, HitTestLayers, pick_nearest};

/// Outcome of routing one primary finger-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutedTouch {
    pub specific: Option<DetectionEvent>,
}

impl RoutedTouch {
    /// Events in delivery order: the raw touch, then the specific hit if there is one.
    pub fn events(&self) -> impl Iterator<Item = DetectionEvent> {
        std::iter::once(DetectionEvent::RawTouch).chain(self.specific)
    }
}

/// Resolves finger-downs into detection events.
///
/// `last_surface_hit_count` is the number of in-polygon hits returned by the most recent
/// surface hit-test. Object taps are only considered while it is non-zero, and it is only
/// refreshed when the surface hit-test actually runs, so an object tap never updates it.
#[derive(Resource, Debug, Default)]
pub struct TouchRouter {
    last_surface_hit_count: usize,
}

impl TouchRouter {
    pub fn last_surface_hit_count(&self) -> usize {
        self.last_surface_hit_count
    }

    /// Returns `None` for every finger other than the primary one. Hit-tests are passed
    /// in lazily so the surface query is skipped when an object is hit.
    pub fn resolve(
        &mut self,
        finger: &FingerDown,
        object_hit_test: impl FnOnce() -> Option<Entity>,
        surface_hit_test: impl FnOnce() -> Vec<SurfaceRaycastHit>,
    ) -> Option<RoutedTouch> {
        if finger.finger_index != PRIMARY_FINGER_INDEX {
            return None;
        }

        if self.last_surface_hit_count > 0 {
            if let Some(target) = object_hit_test() {
                return Some(RoutedTouch {
                    specific: Some(DetectionEvent::ObjectHit(target)),
                });
            }
        }

        let in_polygon: Vec<SurfaceRaycastHit> = surface_hit_test()
            .into_iter()
            .filter(|hit| hit.within_polygon)
            .collect();
        self.last_surface_hit_count = in_polygon.len();

        Some(RoutedTouch {
            specific: in_polygon
                .first()
                .map(|hit| DetectionEvent::SurfaceHit(hit.pose)),
        })
    }
}

pub fn route_finger_downs(
    mut finger_downs: EventReader<FingerDown>,
    mut router: ResMut<TouchRouter>,
    touch_camera: Res<TouchCamera>,
    tracking: Res<SurfaceTracking>,
    settings: Res<PlacementSettings>,
    cameras: Query<(&Camera, &GlobalTransform, Option<&Projection>)>,
    windows: Query<&Window, With<PrimaryWindow>>,
    colliders: Query<(Entity, &GlobalTransform, &HitBounds, &HitTestLayers)>,
    mut detections: EventWriter<DetectionEvent>,
) {
    let viewport_size = windows.single().ok().map(Window::size);

    for finger in finger_downs.read() {
        let (ray, max_distance) = match cameras.get(touch_camera.0) {
            Ok((camera, camera_xf, projection)) => (
                screen_ray(camera, camera_xf, projection, viewport_size, finger.screen_position),
                far_clip_distance(projection, settings.max_hit_distance),
            ),
            Err(_) => {
                warn!("Touch camera {} is gone, object hit-test disabled", touch_camera.0);
                (None, settings.max_hit_distance)
            }
        };
        let query = TouchQuery {
            screen_position: finger.screen_position,
            ray,
        };

        let routed = router.resolve(
            finger,
            || ray.and_then(|ray| pick_nearest(ray, max_distance, settings.object_layers, colliders.iter())),
            || tracking.raycast(&query),
        );
        let Some(routed) = routed else {
            continue;
        };

        for event in routed.events() {
            debug!("Touch at {:?} -> {:?}", finger.screen_position, event);
            detections.write(event);
        }
    }
}

/// Fails startup when the router's collaborators were never provided.
pub fn validate_router_collaborators(
    touch_camera: Option<Res<TouchCamera>>,
    tracking: Option<Res<SurfaceTracking>>,
    cameras: Query<(), With<Camera>>,
) -> Result<(), BevyError> {
    check_collaborators(
        touch_camera.map(|c| *c),
        tracking.is_some(),
        |entity| cameras.contains(entity),
    )?;
    Ok(())
}

pub fn check_collaborators(
    touch_camera: Option<TouchCamera>,
    has_tracking: bool,
    is_camera: impl Fn(Entity) -> bool,
) -> Result<(), PlacementError> {
    let Some(TouchCamera(camera)) = touch_camera else {
        return Err(PlacementError::MissingCollaborator("TouchCamera"));
    };
    if !has_tracking {
        return Err(PlacementError::MissingCollaborator("SurfaceTracking"));
    }
    if !is_camera(camera) {
        return Err(PlacementError::CameraNotFound(camera));
    }
    Ok(())
}

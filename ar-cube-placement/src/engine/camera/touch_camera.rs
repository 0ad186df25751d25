use bevy::prelude::*;
use bevy::render::camera::CameraProjection;

/// The camera used to turn screen touches into world rays.
///
/// Inserted explicitly by the host app once its AR camera exists; the router never
/// searches the world for a "main" camera.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchCamera(pub Entity);

/// World ray through `screen_position`.
///
/// Until the renderer has computed the camera viewport (first frame, headless apps) the
/// ray is unprojected through `projection` sized to `viewport_size`. `None` when neither
/// is available.
pub fn screen_ray(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    projection: Option<&Projection>,
    viewport_size: Option<Vec2>,
    screen_position: Vec2,
) -> Option<Ray3d> {
    camera
        .viewport_to_world(camera_transform, screen_position)
        .ok()
        .or_else(|| {
            unproject(
                camera_transform,
                projection?,
                viewport_size?,
                screen_position,
            )
        })
}

fn unproject(
    camera_transform: &GlobalTransform,
    projection: &Projection,
    viewport_size: Vec2,
    screen_position: Vec2,
) -> Option<Ray3d> {
    if viewport_size.cmple(Vec2::ZERO).any() {
        return None;
    }

    let mut projection = projection.clone();
    projection.update(viewport_size.x, viewport_size.y);

    // Screen space has y down; NDC has y up. Reverse-Z puts the near plane at 1.
    let ndc = Vec2::new(
        screen_position.x / viewport_size.x * 2.0 - 1.0,
        1.0 - screen_position.y / viewport_size.y * 2.0,
    );
    let world_from_ndc =
        camera_transform.compute_matrix() * projection.get_clip_from_view().inverse();
    let near = world_from_ndc.project_point3(ndc.extend(1.0));
    let far = world_from_ndc.project_point3(ndc.extend(f32::EPSILON));

    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// Far clip plane of the camera projection, or `fallback` when it has none we can read.
pub fn far_clip_distance(projection: Option<&Projection>, fallback: f32) -> f32 {
    match projection {
        Some(Projection::Perspective(p)) => p.far,
        Some(Projection::Orthographic(o)) => o.far,
        _ => fallback,
    }
}

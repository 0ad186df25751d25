use bevy::prelude::*;

/// Full size of the oriented box used to hit-test an entity, in its local space.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HitBounds(pub Vec3);

/// Collision layer membership as a bit mask.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTestLayers(pub u32);

impl HitTestLayers {
    pub fn intersects(&self, mask: u32) -> bool {
        self.0 & mask != 0
    }
}

/// Distance along `ray` to the box `size` placed by `xf`, if the ray meets it.
pub fn ray_hits_obb(ray: Ray3d, xf: &GlobalTransform, size: Vec3) -> Option<f32> {
    let inv = xf.compute_matrix().inverse();
    let origin = inv.transform_point3(ray.origin);
    let direction = inv.transform_vector3(*ray.direction);
    let half = size * 0.5;
    ray_aabb_distance(origin, direction, -half, half)
}

// Slab test. A ray starting inside the box reports its exit distance.
pub fn ray_aabb_distance(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let (o, d) = (origin[axis], direction[axis]);
        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = d.recip();
        let (mut t0, mut t1) = ((min[axis] - o) * inv, (max[axis] - o) * inv);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

/// Nearest collider on `layer_mask` hit within `max_distance`.
pub fn pick_nearest<'a>(
    ray: Ray3d,
    max_distance: f32,
    layer_mask: u32,
    colliders: impl IntoIterator<Item = (Entity, &'a GlobalTransform, &'a HitBounds, &'a HitTestLayers)>,
) -> Option<Entity> {
    colliders
        .into_iter()
        .filter(|(_, _, _, layers)| layers.intersects(layer_mask))
        .filter_map(|(entity, xf, bounds, _)| {
            ray_hits_obb(ray, xf, bounds.0)
                .filter(|t| *t <= max_distance)
                .map(|t| (entity, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}

use bevy::math::primitives::InfinitePlane3d;
use bevy::prelude::*;

use super::provider::{
    SurfacePose, SurfaceProvider, SurfaceRaycastHit, SurfacesChanged, TouchQuery, TrackedSurface,
};

// Below this the estimate snaps to the true height and stops reporting updates.
const SETTLE_EPSILON: f32 = 1e-4;

struct SimulatedSurface {
    estimate: TrackedSurface,
    true_height: f32,
    announced: bool,
}

/// Desktop stand-in for a camera tracker: bounded horizontal rectangles whose height
/// estimate converges on the true height a little more on every poll.
pub struct SimulatedSurfaces {
    surfaces: Vec<SimulatedSurface>,
    settle_rate: f32,
}

impl Default for SimulatedSurfaces {
    fn default() -> Self {
        Self {
            surfaces: Vec::new(),
            settle_rate: 0.2,
        }
    }
}

impl SimulatedSurfaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of the remaining height error removed per poll, clamped to (0, 1].
    pub fn with_settle_rate(mut self, rate: f32) -> Self {
        self.settle_rate = rate.clamp(f32::EPSILON, 1.0);
        self
    }

    /// Adds a surface first detected at `initial` whose real height is `true_height`.
    pub fn with_surface(mut self, initial: TrackedSurface, true_height: f32) -> Self {
        self.surfaces.push(SimulatedSurface {
            estimate: initial,
            true_height,
            announced: false,
        });
        self
    }

    pub fn surfaces(&self) -> impl Iterator<Item = &TrackedSurface> {
        self.surfaces.iter().map(|s| &s.estimate)
    }
}

impl SurfaceProvider for SimulatedSurfaces {
    fn raycast(&self, query: &TouchQuery) -> Vec<SurfaceRaycastHit> {
        let Some(ray) = query.ray else {
            return Vec::new();
        };

        let mut hits: Vec<SurfaceRaycastHit> = self
            .surfaces
            .iter()
            .filter_map(|s| {
                let surface = &s.estimate;
                let t = ray.intersect_plane(surface.center, InfinitePlane3d::new(Vec3::Y))?;
                let point = ray.get_point(t);
                Some(SurfaceRaycastHit {
                    pose: SurfacePose::from_position(point),
                    distance: t,
                    surface: surface.id,
                    within_polygon: surface.contains_xz(point),
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn poll_changes(&mut self) -> SurfacesChanged {
        let mut changes = SurfacesChanged::default();

        for s in &mut self.surfaces {
            if !s.announced {
                s.announced = true;
                changes.added.push(s.estimate.clone());
                continue;
            }

            let error = s.true_height - s.estimate.center.y;
            if error.abs() <= SETTLE_EPSILON {
                continue;
            }
            let step = error * self.settle_rate;
            s.estimate.center.y = if step.abs() <= SETTLE_EPSILON {
                s.true_height
            } else {
                s.estimate.center.y + step
            };
            changes.updated.push(s.estimate.clone());
        }

        changes
    }
}

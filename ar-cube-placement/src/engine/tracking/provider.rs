use bevy::prelude::*;

/// Stable identifier of a tracked surface, assigned by the tracking backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl SurfacePose {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Current estimate of a horizontal surface. `extents` are half sizes along X and Z.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedSurface {
    pub id: SurfaceId,
    pub center: Vec3,
    pub extents: Vec2,
}

impl TrackedSurface {
    pub fn new(id: u64, center: Vec3, extents: Vec2) -> Self {
        Self {
            id: SurfaceId(id),
            center,
            extents,
        }
    }

    pub fn height(&self) -> f32 {
        self.center.y
    }

    /// Whether a world point projects inside the bounded polygon of this surface.
    pub fn contains_xz(&self, point: Vec3) -> bool {
        (point.x - self.center.x).abs() <= self.extents.x
            && (point.z - self.center.z).abs() <= self.extents.y
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRaycastHit {
    pub pose: SurfacePose,
    pub distance: f32,
    pub surface: SurfaceId,
    /// False when the ray met the surface's infinite plane outside its detected boundary.
    pub within_polygon: bool,
}

/// A finger-down as seen by hit-testing: the raw screen point and, when the camera
/// could resolve it, the world ray through that point.
#[derive(Debug, Clone, Copy)]
pub struct TouchQuery {
    pub screen_position: Vec2,
    pub ray: Option<Ray3d>,
}

/// Surface estimates that changed since the previous poll.
#[derive(Event, Debug, Clone, Default, PartialEq)]
pub struct SurfacesChanged {
    pub added: Vec<TrackedSurface>,
    pub updated: Vec<TrackedSurface>,
    pub removed: Vec<SurfaceId>,
}

impl SurfacesChanged {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Camera-based surface tracking backend.
pub trait SurfaceProvider: Send + Sync + 'static {
    /// Hits ordered nearest first.
    fn raycast(&self, query: &TouchQuery) -> Vec<SurfaceRaycastHit>;

    fn poll_changes(&mut self) -> SurfacesChanged {
        SurfacesChanged::default()
    }
}

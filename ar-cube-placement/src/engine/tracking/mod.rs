//! Boundary to the camera-based surface tracking subsystem.
//!
//! The tracker itself is external: it is injected as a boxed [`SurfaceProvider`] inside the
//! [`SurfaceTracking`] resource. Each frame the provider is polled and any non-empty change
//! set is re-published as a [`SurfacesChanged`] event for the cube lifecycle to consume.

pub mod provider;

/// Flat rectangular surfaces with converging height estimates, for desktop runs and tests.
pub mod simulated;

use bevy::prelude::*;

pub use provider::{
    SurfaceId, SurfacePose, SurfaceProvider, SurfaceRaycastHit, SurfacesChanged, TouchQuery,
    TrackedSurface,
};
pub use simulated::SimulatedSurfaces;

use crate::PlacementSet;

#[derive(Resource)]
pub struct SurfaceTracking {
    provider: Box<dyn SurfaceProvider>,
}

impl SurfaceTracking {
    pub fn new(provider: impl SurfaceProvider) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }

    pub fn raycast(&self, query: &TouchQuery) -> Vec<SurfaceRaycastHit> {
        self.provider.raycast(query)
    }

    pub fn poll_changes(&mut self) -> SurfacesChanged {
        self.provider.poll_changes()
    }
}

pub struct SurfaceTrackingPlugin;

impl Plugin for SurfaceTrackingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SurfacesChanged>().add_systems(
            Update,
            poll_surface_changes
                .in_set(PlacementSet::Tracking)
                .run_if(resource_exists::<SurfaceTracking>),
        );
    }
}

pub fn poll_surface_changes(
    mut tracking: ResMut<SurfaceTracking>,
    mut changes: EventWriter<SurfacesChanged>,
) {
    let polled = tracking.poll_changes();
    if polled.is_empty() {
        return;
    }
    debug!(
        "Surfaces changed: {} added, {} updated, {} removed",
        polled.added.len(),
        polled.updated.len(),
        polled.removed.len()
    );
    changes.write(polled);
}

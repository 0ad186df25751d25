//! Touch-driven placement of installable cubes on tracked horizontal surfaces.
//!
//! ## Architecture
//!
//! ```text
//! FingerDown ─> TouchRouter ─> DetectionEvent ─> CubeLifecycle ─> spawn / mark / despawn
//!                    │                                 ^
//!          SurfaceTracking ──── SurfacesChanged ───────┘ (height sync)
//! ```
//!
//! Surface tracking and rendering are external: tracking is injected as a
//! [`SurfaceProvider`](engine::tracking::SurfaceProvider), rendering through the optional
//! [`CubeRenderingPlugin`](tools::cube_lifecycle::CubeRenderingPlugin). Everything in
//! [`CubePlacementPlugin`] runs headless.

pub mod engine;
pub mod tools;

use bevy::prelude::*;

use engine::tracking::SurfaceTrackingPlugin;
use tools::cube_lifecycle::CubeLifecyclePlugin;
use tools::touch_router::TouchRouterPlugin;

pub use engine::camera::TouchCamera;
pub use engine::error::PlacementError;
pub use engine::settings::{PlacementSettings, PlacementSettingsPlugin};
pub use engine::tracking::{SimulatedSurfaces, SurfaceTracking};

/// Per-frame ordering of the placement pipeline, chained in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementSet {
    Input,
    Tracking,
    Route,
    Lifecycle,
    Presentation,
}

/// Router, lifecycle manager and tracking boundary, without any rendering.
pub struct CubePlacementPlugin;

impl Plugin for CubePlacementPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                PlacementSet::Input,
                PlacementSet::Tracking,
                PlacementSet::Route,
                PlacementSet::Lifecycle,
                PlacementSet::Presentation,
            )
                .chain(),
        )
        .add_plugins((SurfaceTrackingPlugin, TouchRouterPlugin, CubeLifecyclePlugin));
    }
}

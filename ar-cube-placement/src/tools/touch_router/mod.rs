//! Single-finger touch routing.
//!
//! Converts raw finger-downs into at most one disambiguated intent per gesture:
//!
//! ```text
//! FingerDown (slot 0 only)
//!   └─> DetectionEvent::RawTouch                 always
//!   └─> object hit-test   (gated on cached surface hits)
//!         hit  -> DetectionEvent::ObjectHit(entity)
//!         miss -> surface hit-test (in-polygon hits only)
//!                   hit  -> DetectionEvent::SurfaceHit(pose of nearest hit)
//!                   miss -> nothing further
//! ```
//!
//! The router owns no placed objects. It depends on two injected collaborators, the
//! [`TouchCamera`](crate::engine::camera::TouchCamera) and the
//! [`SurfaceTracking`](crate::engine::tracking::SurfaceTracking) backend, and refuses to
//! start without them.

pub mod events;

/// Touch and simulated-mouse acquisition, finger slot assignment.
pub mod input;

/// Oriented box ray tests for the installable object layer.
pub mod ray;

pub mod router;

use bevy::prelude::*;

pub use events::{DetectionEvent, FingerDown};
pub use input::{FingerSlots, PointerCapture, emit_finger_downs};
pub use ray::{HitBounds, HitTestLayers, pick_nearest};
pub use router::{RoutedTouch, TouchRouter, route_finger_downs, validate_router_collaborators};

use crate::PlacementSet;
use crate::engine::settings::PlacementSettings;

pub struct TouchRouterPlugin;

impl Plugin for TouchRouterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlacementSettings>()
            .init_resource::<FingerSlots>()
            .init_resource::<PointerCapture>()
            .init_resource::<TouchRouter>()
            .add_event::<FingerDown>()
            .add_event::<DetectionEvent>()
            .add_systems(PostStartup, validate_router_collaborators)
            .add_systems(
                Update,
                (
                    emit_finger_downs.in_set(PlacementSet::Input),
                    route_finger_downs.in_set(PlacementSet::Route),
                ),
            );
    }
}

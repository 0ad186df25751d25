//! Placed cube lifecycle: creation, the delete arm / cancel / commit protocol and
//! surface height synchronisation.
//!
//! ## State machine per cube
//!
//! ```text
//! SurfaceHit ──> Created(Normal) ──ObjectHit──> MarkedForDeletion ──deadline──> Destroyed
//!                                                   │   ^
//!                                                   └───┘ ObjectHit re-arms
//! ```
//!
//! A `RawTouch` cancels the pending deletion but leaves the cube marked. Only one deletion
//! is pending at a time; arming a new one cancels the old one first.
//!
//! ## Frame order
//!
//! Within `PlacementSet::Lifecycle` the pending timer is ticked first, then detection events
//! are applied in the order the router wrote them (raw touch before the specific hit), then
//! surface changes and move commands.
//!
//! ## Subscription lifetime
//!
//! Every handler here runs only while the [`CubeLifecycle`] resource exists. Inserting it
//! subscribes the manager to router and tracking events; removing it unsubscribes.

pub mod lifecycle;

/// Left / right / stop broadcasts to every placed cube.
pub mod motion;

/// Prefab assets and reflection of cube and controls state into visuals.
pub mod presentation;

pub mod state;

/// Native on-screen move controls.
pub mod interactions;
pub mod ui;

use bevy::prelude::*;

pub use lifecycle::{handle_detection_events, spawn_cube, sync_cube_heights, tick_pending_deletion};
pub use motion::{CubeMotion, CubeMoveCommand, MoveDirection};
pub use presentation::{CubePrefab, PlacementControls};
pub use state::{CubeLifecycle, CubeVisualState, InstallableCube, PendingDeletion};

use crate::PlacementSet;
use crate::engine::settings::PlacementSettings;
use crate::engine::tracking::SurfacesChanged;
use crate::tools::touch_router::DetectionEvent;

use interactions::{move_button_interaction, update_pointer_capture};
use motion::{apply_cube_motion, broadcast_move_commands};
use presentation::{reflect_controls_visibility, reflect_cube_visual_state, setup_cube_prefab};
use ui::spawn_controls_panel;

pub struct CubeLifecyclePlugin;

impl Plugin for CubeLifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlacementSettings>()
            .init_resource::<CubeLifecycle>()
            .add_event::<DetectionEvent>()
            .add_event::<SurfacesChanged>()
            .add_event::<CubeMoveCommand>()
            .add_systems(
                Update,
                (
                    tick_pending_deletion,
                    handle_detection_events,
                    sync_cube_heights,
                    broadcast_move_commands,
                    apply_cube_motion,
                )
                    .chain()
                    .in_set(PlacementSet::Lifecycle)
                    .run_if(resource_exists::<CubeLifecycle>),
            )
            .add_systems(
                Update,
                (reflect_cube_visual_state, reflect_controls_visibility)
                    .in_set(PlacementSet::Presentation)
                    .run_if(resource_exists::<CubeLifecycle>),
            );
    }
}

/// Gives placed cubes a mesh and materials. Requires the PBR render plugins.
pub struct CubeRenderingPlugin;

impl Plugin for CubeRenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_cube_prefab);
    }
}

/// Native move controls panel. Requires the UI plugins.
pub struct ControlsUiPlugin;

impl Plugin for ControlsUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_controls_panel).add_systems(
            Update,
            (
                update_pointer_capture.before(PlacementSet::Input),
                move_button_interaction.before(PlacementSet::Lifecycle),
            ),
        );
    }
}

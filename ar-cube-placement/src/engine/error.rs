use bevy::prelude::Entity;
use thiserror::Error;

/// Configuration failures that stop the placement plugins from running.
///
/// Hit-test misses and cancellations with nothing pending are normal outcomes and never
/// produce one of these.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("touch router requires a {0} resource but none was inserted")]
    MissingCollaborator(&'static str),

    #[error("touch camera entity {0} has no Camera component")]
    CameraNotFound(Entity),

    #[error("invalid placement settings: {0}")]
    InvalidSettings(String),
}

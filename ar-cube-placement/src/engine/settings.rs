use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use serde::Deserialize;

use constants::layers::INSTALLABLE_OBJECT_LAYER;
use constants::placement::{
    DEFAULT_CUBE_SIZE, DEFAULT_DELETE_TOUCH_DURATION_SECS, DEFAULT_MAX_HIT_DISTANCE,
    DEFAULT_MOVE_SPEED, PLACEMENT_SETTINGS_PATH,
};

use super::error::PlacementError;

/// Runtime tuning for touch routing and the cube lifecycle.
/// Missing JSON fields fall back to the compiled defaults.
#[derive(Resource, Asset, TypePath, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    /// Delay between arming a deletion and committing it.
    pub delete_touch_duration_secs: f32,
    pub cube_size: f32,
    pub move_speed: f32,
    /// Object hit-test range when the camera projection does not provide a far plane.
    pub max_hit_distance: f32,
    /// Layer mask the object hit-test is restricted to.
    pub object_layers: u32,
    /// Deliver left mouse presses as primary finger-downs.
    pub simulate_touch_with_mouse: bool,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            delete_touch_duration_secs: DEFAULT_DELETE_TOUCH_DURATION_SECS,
            cube_size: DEFAULT_CUBE_SIZE,
            move_speed: DEFAULT_MOVE_SPEED,
            max_hit_distance: DEFAULT_MAX_HIT_DISTANCE,
            object_layers: INSTALLABLE_OBJECT_LAYER,
            simulate_touch_with_mouse: true,
        }
    }
}

impl PlacementSettings {
    pub fn validate(&self) -> Result<(), PlacementError> {
        if !self.delete_touch_duration_secs.is_finite() || self.delete_touch_duration_secs < 0.0 {
            return Err(PlacementError::InvalidSettings(format!(
                "delete_touch_duration_secs must be a non-negative number, got {}",
                self.delete_touch_duration_secs
            )));
        }
        if !self.cube_size.is_finite() || self.cube_size <= 0.0 {
            return Err(PlacementError::InvalidSettings(format!(
                "cube_size must be positive, got {}",
                self.cube_size
            )));
        }
        if !self.move_speed.is_finite() {
            return Err(PlacementError::InvalidSettings("move_speed must be finite".into()));
        }
        if !self.max_hit_distance.is_finite() || self.max_hit_distance <= 0.0 {
            return Err(PlacementError::InvalidSettings(format!(
                "max_hit_distance must be positive, got {}",
                self.max_hit_distance
            )));
        }
        if self.object_layers == 0 {
            return Err(PlacementError::InvalidSettings(
                "object_layers must select at least one layer".into(),
            ));
        }
        Ok(())
    }
}

/// Loads `PlacementSettings` from a JSON asset and swaps it in once it arrives.
pub struct PlacementSettingsPlugin {
    pub path: String,
}

impl Default for PlacementSettingsPlugin {
    fn default() -> Self {
        Self {
            path: PLACEMENT_SETTINGS_PATH.to_string(),
        }
    }
}

impl Plugin for PlacementSettingsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(JsonAssetPlugin::<PlacementSettings>::new(&["json"]))
            .insert_resource(SettingsLoader {
                path: self.path.clone(),
                handle: None,
                applied: false,
            })
            .add_systems(Startup, start_settings_load)
            .add_systems(Update, apply_loaded_settings);
    }
}

#[derive(Resource)]
pub struct SettingsLoader {
    path: String,
    handle: Option<Handle<PlacementSettings>>,
    applied: bool,
}

pub fn start_settings_load(mut loader: ResMut<SettingsLoader>, asset_server: Res<AssetServer>) {
    info!("Loading placement settings from {}", loader.path);
    let handle = asset_server.load(loader.path.clone());
    loader.handle = Some(handle);
}

// Invalid files are reported and the defaults stay in place.
pub fn apply_loaded_settings(
    mut loader: ResMut<SettingsLoader>,
    loaded: Res<Assets<PlacementSettings>>,
    mut commands: Commands,
) {
    if loader.applied {
        return;
    }
    let Some(settings) = loader.handle.as_ref().and_then(|h| loaded.get(h)) else {
        return;
    };

    match settings.validate() {
        Ok(()) => {
            info!("Placement settings applied: {:?}", settings);
            commands.insert_resource(settings.clone());
        }
        Err(err) => warn!("Ignoring {}: {}", loader.path, err),
    }
    loader.applied = true;
}

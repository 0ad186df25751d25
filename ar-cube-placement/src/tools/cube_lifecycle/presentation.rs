use bevy::prelude::*;
use constants::render_settings::{CUBE_MARKED_COLOUR, CUBE_NORMAL_COLOUR};

use super::state::{CubeLifecycle, CubeVisualState, InstallableCube};

/// Shared mesh and materials for placed cubes. Only present when rendering is enabled.
#[derive(Resource, Clone)]
pub struct CubePrefab {
    pub mesh: Handle<Mesh>,
    pub normal_material: Handle<StandardMaterial>,
    pub marked_material: Handle<StandardMaterial>,
}

/// Marker for the on-screen controls whose visibility follows the cube collection.
#[derive(Component)]
pub struct PlacementControls;

pub fn setup_cube_prefab(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let material = |colour: Color| StandardMaterial {
        base_color: colour,
        perceptual_roughness: 0.8,
        ..default()
    };

    commands.insert_resource(CubePrefab {
        mesh: meshes.add(Cuboid::from_length(1.0)),
        normal_material: materials.add(material(CUBE_NORMAL_COLOUR)),
        marked_material: materials.add(material(CUBE_MARKED_COLOUR)),
    });
}

pub fn reflect_cube_visual_state(
    prefab: Option<Res<CubePrefab>>,
    cubes: Query<(Entity, &InstallableCube), Changed<InstallableCube>>,
    mut commands: Commands,
) {
    let Some(prefab) = prefab else {
        return;
    };
    for (entity, cube) in &cubes {
        let material = match cube.state {
            CubeVisualState::Normal => prefab.normal_material.clone(),
            CubeVisualState::MarkedForDeletion => prefab.marked_material.clone(),
        };
        commands.entity(entity).try_insert(MeshMaterial3d(material));
    }
}

pub fn reflect_controls_visibility(
    lifecycle: Res<CubeLifecycle>,
    mut controls: Query<&mut Visibility, With<PlacementControls>>,
) {
    let target = if lifecycle.controls_visible() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in &mut controls {
        visibility.set_if_neq(target);
    }
}

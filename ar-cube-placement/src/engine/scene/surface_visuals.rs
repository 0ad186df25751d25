use bevy::prelude::*;
use bevy::render::alpha::AlphaMode;
use constants::render_settings::SURFACE_COLOUR;

use crate::engine::tracking::{SurfaceId, SurfacesChanged, TrackedSurface};

#[derive(Component, Debug, Clone, Copy)]
pub struct SurfaceVisual(pub SurfaceId);

pub fn spawn_surface_visual(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    surface: &TrackedSurface,
) -> Entity {
    commands
        .spawn((
            Mesh3d(meshes.add(Plane3d::new(Vec3::Y, surface.extents))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: SURFACE_COLOUR,
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            })),
            Transform::from_translation(surface.center),
            SurfaceVisual(surface.id),
            Name::new(format!("Surface{}", surface.id.0)),
        ))
        .id()
}

pub fn sync_surface_visuals(
    mut changes: EventReader<SurfacesChanged>,
    mut visuals: Query<(&SurfaceVisual, &mut Transform)>,
) {
    for change in changes.read() {
        for surface in change.added.iter().chain(&change.updated) {
            for (visual, mut xf) in &mut visuals {
                if visual.0 == surface.id {
                    xf.translation = surface.center;
                }
            }
        }
    }
}

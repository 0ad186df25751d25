use bevy::prelude::*;

use crate::engine::settings::PlacementSettings;

use super::state::CubeLifecycle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
}

impl MoveDirection {
    fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CubeMotion {
    pub direction: Option<MoveDirection>,
}

/// Command fanned out to every placed cube.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeMoveCommand {
    StartRight,
    StartLeft,
    Stop,
}

impl CubeMoveCommand {
    fn direction(self) -> Option<MoveDirection> {
        match self {
            Self::StartRight => Some(MoveDirection::Right),
            Self::StartLeft => Some(MoveDirection::Left),
            Self::Stop => None,
        }
    }
}

pub fn broadcast_move_commands(
    mut move_commands: EventReader<CubeMoveCommand>,
    lifecycle: Res<CubeLifecycle>,
    mut motions: Query<&mut CubeMotion>,
) {
    for command in move_commands.read() {
        let motion = CubeMotion {
            direction: command.direction(),
        };
        for cube in lifecycle.cubes() {
            if let Ok(mut current) = motions.get_mut(*cube) {
                current.set_if_neq(motion);
            }
        }
    }
}

pub fn apply_cube_motion(
    time: Res<Time>,
    settings: Res<PlacementSettings>,
    mut cubes: Query<(&CubeMotion, &mut Transform)>,
) {
    let step = settings.move_speed * time.delta_secs();
    for (motion, mut xf) in &mut cubes {
        if let Some(direction) = motion.direction {
            xf.translation.x += direction.sign() * step;
        }
    }
}

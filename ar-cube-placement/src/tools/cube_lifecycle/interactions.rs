use bevy::prelude::*;
use constants::render_settings::{
    CONTROL_HOVER_COLOUR, CONTROL_IDLE_COLOUR, CONTROL_PRESSED_COLOUR,
};

use crate::tools::touch_router::PointerCapture;

use super::motion::CubeMoveCommand;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveButton {
    Left,
    Stop,
    Right,
}

// Holding a move button moves the cubes; letting go (or sliding off) stops them.
pub fn move_button_interaction(
    mut q: Query<(&Interaction, &MoveButton, &mut BackgroundColor), Changed<Interaction>>,
    mut move_commands: EventWriter<CubeMoveCommand>,
) {
    for (interaction, button, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                *bg = BackgroundColor(CONTROL_PRESSED_COLOUR);
                move_commands.write(match button {
                    MoveButton::Left => CubeMoveCommand::StartLeft,
                    MoveButton::Right => CubeMoveCommand::StartRight,
                    MoveButton::Stop => CubeMoveCommand::Stop,
                });
            }
            Interaction::Hovered | Interaction::None => {
                *bg = BackgroundColor(if *interaction == Interaction::Hovered {
                    CONTROL_HOVER_COLOUR
                } else {
                    CONTROL_IDLE_COLOUR
                });
                if *button != MoveButton::Stop {
                    move_commands.write(CubeMoveCommand::Stop);
                }
            }
        }
    }
}

// Keeps taps on the controls from reaching the touch router.
pub fn update_pointer_capture(
    buttons: Query<&Interaction, With<MoveButton>>,
    mut capture: ResMut<PointerCapture>,
) {
    let captured = buttons.iter().any(|i| *i != Interaction::None);
    if capture.captured != captured {
        capture.captured = captured;
    }
}

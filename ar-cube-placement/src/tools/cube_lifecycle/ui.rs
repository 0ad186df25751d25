use bevy::prelude::*;
use constants::render_settings::{CONTROL_BUTTON_SIZE, CONTROL_IDLE_COLOUR};

use super::interactions::MoveButton;
use super::presentation::PlacementControls;

// Bottom-centred row of move controls, hidden until the first cube is placed.
pub fn spawn_controls_panel(mut commands: Commands) {
    commands
        .spawn((
            PlacementControls,
            Name::new("PlacementControls"),
            Visibility::Hidden,
            Node {
                width: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                bottom: Val::Px(24.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::Center,
                column_gap: Val::Px(16.0),
                ..default()
            },
        ))
        .with_children(|row| {
            for (button, label) in [
                (MoveButton::Left, "<"),
                (MoveButton::Stop, "||"),
                (MoveButton::Right, ">"),
            ] {
                row.spawn((
                    button,
                    Button,
                    Name::new(format!("{:?}Button", button)),
                    BackgroundColor(CONTROL_IDLE_COLOUR),
                    BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                    Node {
                        width: Val::Px(CONTROL_BUTTON_SIZE),
                        height: Val::Px(CONTROL_BUTTON_SIZE),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                ))
                .with_children(|btn| {
                    btn.spawn((
                        Text::new(label),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
            }
        });
}

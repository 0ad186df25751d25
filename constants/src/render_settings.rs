use bevy::color::Color;

pub const CUBE_NORMAL_COLOUR: Color = Color::srgb(0.25, 0.55, 0.95);
pub const CUBE_MARKED_COLOUR: Color = Color::srgb(0.95, 0.15, 0.15);

/// Tint of the visual quad drawn over a simulated tracked surface.
pub const SURFACE_COLOUR: Color = Color::srgba(0.9, 0.9, 0.9, 0.35);

pub const CONTROL_BUTTON_SIZE: f32 = 56.0;
pub const CONTROL_IDLE_COLOUR: Color = Color::srgb(0.22, 0.24, 0.28);
pub const CONTROL_HOVER_COLOUR: Color = Color::srgb(0.26, 0.28, 0.32);
pub const CONTROL_PRESSED_COLOUR: Color = Color::srgb(0.18, 0.20, 0.24);

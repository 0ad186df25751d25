/// Seconds between tapping a cube and the cube being removed, unless another tap cancels it.
pub const DEFAULT_DELETE_TOUCH_DURATION_SECS: f32 = 1.5;

/// Edge length of a placed cube in metres.
pub const DEFAULT_CUBE_SIZE: f32 = 0.1;

/// Lateral speed of a moving cube in metres per second.
pub const DEFAULT_MOVE_SPEED: f32 = 0.25;

/// Ray length used for the object hit-test when the camera has no readable far clip plane.
pub const DEFAULT_MAX_HIT_DISTANCE: f32 = 1000.0;

/// Relative path (inside the asset folder) of the optional JSON tuning file.
pub const PLACEMENT_SETTINGS_PATH: &str = "placement.json";

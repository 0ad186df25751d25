pub mod touch_camera;

pub use touch_camera::{TouchCamera, far_clip_distance, screen_ray};

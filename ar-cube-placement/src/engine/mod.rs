pub mod camera;
pub mod core;
pub mod error;
pub mod scene;
pub mod settings;
pub mod tracking;

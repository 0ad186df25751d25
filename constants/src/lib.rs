pub mod layers;
pub mod placement;
pub mod render_settings;

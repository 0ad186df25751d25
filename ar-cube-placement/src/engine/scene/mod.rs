/// Visual quads that follow the simulated surface estimates in the desktop demo.
pub mod surface_visuals;

pub use surface_visuals::{SurfaceVisual, spawn_surface_visual, sync_surface_visuals};

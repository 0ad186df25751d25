//! Desktop demo application setup.
//!
//! Wires the placement plugins to a window, a camera and a simulated surface tracker so the
//! interaction can be exercised with a mouse.

/// App construction, plugin registration and demo scene.
pub mod app_setup;

/// Platform-specific window configuration for native and WASM builds.
pub mod window_config;

//! Interactive placement tools.
//!
//! - [`touch_router`]: turns a primary finger-down into one intent (object tap, surface tap
//!   or nothing) plus a raw touch notification.
//! - [`cube_lifecycle`]: owns the placed cubes and reacts to those intents and to surface
//!   estimate updates.

pub mod cube_lifecycle;
pub mod touch_router;

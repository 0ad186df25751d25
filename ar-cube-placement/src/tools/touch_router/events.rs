use bevy::prelude::*;

use crate::engine::tracking::SurfacePose;

/// A contact starting on screen. `finger_index` is the slot the contact occupies, 0 being
/// the first finger down.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FingerDown {
    pub finger_index: usize,
    pub screen_position: Vec2,
}

/// Disambiguated result of a primary finger-down.
///
/// Every routed finger-down produces `RawTouch` first, followed by at most one of
/// `ObjectHit` or `SurfaceHit`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum DetectionEvent {
    RawTouch,
    ObjectHit(Entity),
    SurfaceHit(SurfacePose),
}


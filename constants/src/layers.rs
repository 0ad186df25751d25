/// Collision layer reserved for installable objects. Only entities carrying this bit
/// in their hit-test mask are candidates for the object hit-test.
pub const INSTALLABLE_OBJECT_LAYER: u32 = 1 << 6;

/// Finger slot treated as the primary finger. Every other slot is ignored by the router.
pub const PRIMARY_FINGER_INDEX: usize = 0;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::settings::PlacementSettings;

use super::events::FingerDown;

// Contact id used for the mouse when it stands in for a finger.
const SIMULATED_TOUCH_ID: u64 = u64::MAX;

/// Maps OS touch ids to finger slots. A new contact takes the lowest free slot, so the
/// first finger down while no other finger is held is always slot 0.
#[derive(Resource, Debug, Default)]
pub struct FingerSlots {
    slots: Vec<Option<u64>>,
}

impl FingerSlots {
    pub fn press(&mut self, id: u64) -> usize {
        if let Some(index) = self.slots.iter().position(|slot| *slot == Some(id)) {
            return index;
        }
        match self.slots.iter().position(Option::is_none) {
            Some(index) => {
                self.slots[index] = Some(id);
                index
            }
            None => {
                self.slots.push(Some(id));
                self.slots.len() - 1
            }
        }
    }

    pub fn release(&mut self, id: u64) {
        for slot in self.slots.iter_mut().filter(|slot| **slot == Some(id)) {
            *slot = None;
        }
    }
}

/// Set while on-screen controls own the pointer. Contacts still occupy finger slots
/// but no `FingerDown` is produced for them.
#[derive(Resource, Debug, Default)]
pub struct PointerCapture {
    pub captured: bool,
}

/// Turns touch contacts (and, when enabled, left mouse presses) into `FingerDown` events.
pub fn emit_finger_downs(
    touches: Option<Res<Touches>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    settings: Res<PlacementSettings>,
    capture: Res<PointerCapture>,
    mut slots: ResMut<FingerSlots>,
    mut finger_downs: EventWriter<FingerDown>,
) {
    let mut pressed: Vec<(u64, Vec2)> = Vec::new();
    let mut ended: Vec<u64> = Vec::new();

    if let Some(touches) = touches.as_deref() {
        ended.extend(
            touches
                .iter_just_released()
                .chain(touches.iter_just_canceled())
                .map(|t| t.id()),
        );
        pressed.extend(touches.iter_just_pressed().map(|t| (t.id(), t.position())));
    }

    if settings.simulate_touch_with_mouse {
        if let Some(mouse) = mouse.as_deref() {
            if mouse.just_released(MouseButton::Left) {
                ended.push(SIMULATED_TOUCH_ID);
            }
            if mouse.just_pressed(MouseButton::Left) {
                let cursor = windows.single().ok().and_then(Window::cursor_position);
                if let Some(cursor) = cursor {
                    pressed.push((SIMULATED_TOUCH_ID, cursor));
                }
            }
        }
    }

    // Earlier contacts free their slots first; a contact that began this frame keeps
    // its slot for the press and gives it back afterwards.
    let (stale, same_frame): (Vec<u64>, Vec<u64>) = ended
        .into_iter()
        .partition(|id| !pressed.iter().any(|(p, _)| p == id));
    for id in stale {
        slots.release(id);
    }

    for (id, screen_position) in pressed {
        let finger_index = slots.press(id);
        if capture.captured {
            continue;
        }
        finger_downs.write(FingerDown {
            finger_index,
            screen_position,
        });
    }

    for id in same_frame {
        slots.release(id);
    }
}

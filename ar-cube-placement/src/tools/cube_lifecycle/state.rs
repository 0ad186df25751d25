use std::time::Duration;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CubeVisualState {
    #[default]
    Normal,
    /// A deletion was armed for this cube. Stays set after a cancel.
    MarkedForDeletion,
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallableCube {
    pub state: CubeVisualState,
}

/// The one outstanding delayed removal.
#[derive(Debug, Clone)]
pub struct PendingDeletion {
    target: Entity,
    timer: Timer,
}

impl PendingDeletion {
    pub fn target(&self) -> Entity {
        self.target
    }
}

/// Owns the placed cubes, the single pending deletion and the controls-visible flag.
///
/// The flag is true exactly while at least one cube is registered: it is raised by the
/// first `register` and dropped by the `remove` that empties the collection.
#[derive(Resource, Debug, Default)]
pub struct CubeLifecycle {
    cubes: Vec<Entity>,
    pending: Option<PendingDeletion>,
    controls_visible: bool,
}

impl CubeLifecycle {
    /// Placed cubes in creation order.
    pub fn cubes(&self) -> &[Entity] {
        &self.cubes
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    pub fn contains(&self, cube: Entity) -> bool {
        self.cubes.contains(&cube)
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn pending(&self) -> Option<&PendingDeletion> {
        self.pending.as_ref()
    }

    pub fn register(&mut self, cube: Entity) {
        self.cubes.push(cube);
        self.controls_visible = true;
    }

    /// Starts the delayed removal of `target`. Any deletion still pending is cancelled
    /// first and its target returned, so at most one timer is ever outstanding.
    pub fn arm_deletion(&mut self, target: Entity, delay: Duration) -> Option<Entity> {
        let replaced = self.cancel_pending();
        self.pending = Some(PendingDeletion {
            target,
            timer: Timer::new(delay, TimerMode::Once),
        });
        replaced
    }

    /// Cancelling with nothing pending is a no-op.
    pub fn cancel_pending(&mut self) -> Option<Entity> {
        self.pending.take().map(|p| p.target)
    }

    /// Advances the pending timer; returns the target once its deadline has elapsed.
    pub fn tick(&mut self, delta: Duration) -> Option<Entity> {
        let pending = self.pending.as_mut()?;
        if !pending.timer.tick(delta).finished() {
            return None;
        }
        self.cancel_pending()
    }

    /// Removes `cube`, returning false when it was not registered.
    pub fn remove(&mut self, cube: Entity) -> bool {
        let Some(index) = self.cubes.iter().position(|c| *c == cube) else {
            return false;
        };
        self.cubes.remove(index);
        if self.cubes.is_empty() {
            self.controls_visible = false;
        }
        true
    }
}

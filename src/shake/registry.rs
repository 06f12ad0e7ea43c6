//! Broadcast set of shakers
//!
//! The registry is owned by whoever composes the scene. Targets join when they
//! become live and leave on teardown; broadcasts skip inactive shakers.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use super::params::ShakeParameters;
use super::result::ShakeResult;
use super::shaker::{ShakeHandle, Shaker, new_shake};
use crate::clock::FrameTick;

/// Shared handle to a registered shaker
pub type ShakerHandle = Rc<RefCell<Shaker>>;

#[derive(Debug, Default)]
pub struct ShakerRegistry {
    shakers: Vec<ShakerHandle>,
}

impl ShakerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the broadcast set; registering twice is a no-op
    pub fn register(&mut self, shaker: ShakerHandle) {
        if !self.contains(&shaker) {
            self.shakers.push(shaker);
        }
    }

    /// Leave the broadcast set; returns whether the shaker was registered
    pub fn unregister(&mut self, shaker: &ShakerHandle) -> bool {
        let before = self.shakers.len();
        self.shakers.retain(|s| !Rc::ptr_eq(s, shaker));
        self.shakers.len() != before
    }

    pub fn contains(&self, shaker: &ShakerHandle) -> bool {
        self.shakers.iter().any(|s| Rc::ptr_eq(s, shaker))
    }

    pub fn shakers(&self) -> &[ShakerHandle] {
        &self.shakers
    }

    pub fn len(&self) -> usize {
        self.shakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shakers.is_empty()
    }

    fn active(&self) -> impl Iterator<Item = &ShakerHandle> {
        self.shakers.iter().filter(|s| s.borrow().is_active())
    }

    /// Shake every active shaker with one shared instance
    ///
    /// All targets move identically. Controlling the returned handle affects
    /// every one of them.
    pub fn shake_all(&self, parameters: &ShakeParameters, seed: Option<i32>) -> ShakeHandle {
        let shake = new_shake(parameters, seed);
        self.add_shake_all(&shake);
        shake
    }

    /// Shake every active shaker with its own instance
    ///
    /// `seed` is handed to every shaker unchanged, so a fixed seed gives every
    /// target the same motion. Leave it `None` for decorrelated shakes.
    pub fn shake_all_separate(&self, parameters: &ShakeParameters, seed: Option<i32>) -> Vec<ShakeHandle> {
        let shakes: Vec<_> = self
            .active()
            .map(|s| s.borrow_mut().shake(parameters, seed))
            .collect();
        log::debug!("Broadcast {} separate shake(s)", shakes.len());
        shakes
    }

    /// Shake every active shaker within `max_distance` of `point`, scaled by distance
    pub fn shake_all_from_point(
        &self,
        point: Vec3,
        max_distance: f32,
        parameters: &ShakeParameters,
        seed: Option<i32>,
    ) -> Vec<ShakeHandle> {
        let shakes: Vec<_> = self
            .active()
            .filter_map(|s| s.borrow_mut().shake_from_point(point, max_distance, parameters, seed))
            .collect();
        log::debug!(
            "Broadcast shake from {point}: {} of {} shaker(s) in range",
            shakes.len(),
            self.shakers.len()
        );
        shakes
    }

    /// Attach an existing shake to every active shaker
    pub fn add_shake_all(&self, shake: &ShakeHandle) {
        let mut count = 0;
        for shaker in self.active() {
            shaker.borrow_mut().add_shake(Rc::clone(shake));
            count += 1;
        }
        log::debug!("Shared shake attached to {count} shaker(s)");
    }

    /// Update every registered shaker (active or not) and return their offsets in order
    pub fn update_all(&self, dt: f32, tick: FrameTick) -> Vec<ShakeResult> {
        self.shakers
            .iter()
            .map(|s| s.borrow_mut().update(dt, tick))
            .collect()
    }
}

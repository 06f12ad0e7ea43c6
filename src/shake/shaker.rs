//! Shaker: sums every active shake on one target
//!
//! The host sets the target's world position, calls [`Shaker::update`] once
//! per frame and applies the returned offset in the target's local space.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::instance::ShakeInstance;
use super::params::ShakeParameters;
use super::result::ShakeResult;
use crate::clock::FrameTick;
use crate::noise::PerlinNoise;

/// Live handle to a running shake
///
/// Several shakers may hold the same handle (broadcast shakes). Each shaker
/// drops its handle once the shake is finished.
pub type ShakeHandle = Rc<RefCell<ShakeInstance>>;

/// Wrap a fresh shake in a handle
pub fn new_shake(parameters: &ShakeParameters, seed: Option<i32>) -> ShakeHandle {
    Rc::new(RefCell::new(ShakeInstance::new(parameters, seed)))
}

/// Fraction of strength left at `distance` from a shake origin
///
/// `None` at or beyond `max_distance`.
pub fn distance_falloff(distance: f32, max_distance: f32) -> Option<f32> {
    if distance < max_distance {
        Some(1.0 - (distance / max_distance).clamp(0.0, 1.0))
    } else {
        None
    }
}

/// A shake target (camera rig, prop, UI element)
#[derive(Debug)]
pub struct Shaker {
    position: Vec3,
    active: bool,
    noise: PerlinNoise,
    rng: Pcg32,
    shakes: Vec<ShakeHandle>,
    offset: ShakeResult,
}

impl Default for Shaker {
    fn default() -> Self {
        Self::new()
    }
}

impl Shaker {
    /// Create an active shaker at the origin; unseeded shakes draw from entropy
    pub fn new() -> Self {
        Self::with_rng(Pcg32::from_rng(&mut rand::rng()))
    }

    /// Create a shaker whose unseeded shakes are reproducible
    pub fn with_rng_seed(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }

    fn with_rng(rng: Pcg32) -> Self {
        Self {
            position: Vec3::ZERO,
            active: true,
            noise: PerlinNoise::default(),
            rng,
            shakes: Vec::new(),
            offset: ShakeResult::ZERO,
        }
    }

    /// Use a different noise field
    pub fn with_noise(mut self, noise: PerlinNoise) -> Self {
        self.noise = noise;
        self
    }

    /// World position of the target, used for distance falloff
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Inactive shakers are skipped by registry broadcasts
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Start a shake on this target
    pub fn shake(&mut self, parameters: &ShakeParameters, seed: Option<i32>) -> ShakeHandle {
        let instance = ShakeInstance::with_rng(parameters, seed, &mut self.rng);
        log::debug!(
            "Shake started: {:?} strength={} seed={}",
            parameters.shake_type,
            parameters.strength,
            instance.seed()
        );
        let handle = Rc::new(RefCell::new(instance));
        self.add_shake(Rc::clone(&handle));
        handle
    }

    /// Start a shake scaled down linearly by the distance to `point`
    ///
    /// Returns `None` (and starts nothing) when the target is at or beyond
    /// `max_distance`.
    pub fn shake_from_point(
        &mut self,
        point: Vec3,
        max_distance: f32,
        parameters: &ShakeParameters,
        seed: Option<i32>,
    ) -> Option<ShakeHandle> {
        let distance = self.position.distance(point);
        let Some(scale) = distance_falloff(distance, max_distance) else {
            log::trace!("Shake culled: distance {distance} >= {max_distance}");
            return None;
        };

        let mut instance = ShakeInstance::with_rng(parameters, seed, &mut self.rng);
        instance.strength_scale = scale;
        instance.roughness_scale = scale;
        log::debug!("Shake from point started: distance={distance} scale={scale}");

        let handle = Rc::new(RefCell::new(instance));
        self.add_shake(Rc::clone(&handle));
        Some(handle)
    }

    /// Attach an existing shake, possibly shared with other shakers
    pub fn add_shake(&mut self, shake: ShakeHandle) {
        self.shakes.push(shake);
    }

    /// Drop finished shakes and sum the rest into this frame's offset
    pub fn update(&mut self, dt: f32, tick: FrameTick) -> ShakeResult {
        let before = self.shakes.len();
        self.shakes.retain(|s| !s.borrow().is_finished());
        if self.shakes.len() != before {
            log::trace!("Pruned {} finished shake(s)", before - self.shakes.len());
        }

        let noise = &self.noise;
        self.offset = self
            .shakes
            .iter()
            .map(|s| s.borrow_mut().advance(noise, dt, tick))
            .sum();
        self.offset
    }

    /// Offset from the most recent update
    pub fn offset(&self) -> ShakeResult {
        self.offset
    }

    pub fn active_shakes(&self) -> &[ShakeHandle] {
        &self.shakes
    }

    pub fn len(&self) -> usize {
        self.shakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shakes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shake::ShakeState;
    use proptest::prelude::*;

    fn sustained() -> ShakeParameters {
        ShakeParameters::sustained(1.0, 2.0).with_fades(0.1, 0.1)
    }

    #[test]
    fn test_falloff_values() {
        assert_eq!(distance_falloff(0.0, 10.0), Some(1.0));
        assert_eq!(distance_falloff(5.0, 10.0), Some(0.5));
        assert_eq!(distance_falloff(10.0, 10.0), None);
        assert_eq!(distance_falloff(11.0, 10.0), None);
        assert_eq!(distance_falloff(0.0, 0.0), None);
    }

    #[test]
    fn test_shake_from_point_scales() {
        let mut shaker = Shaker::with_rng_seed(1);
        shaker.set_position(Vec3::new(3.0, 4.0, 0.0));

        let near = shaker
            .shake_from_point(Vec3::new(3.0, 4.0, 0.0), 10.0, &sustained(), None)
            .expect("in range");
        assert_eq!(near.borrow().strength_scale, 1.0);

        let half = shaker
            .shake_from_point(Vec3::ZERO, 10.0, &sustained(), None)
            .expect("in range");
        assert_eq!(half.borrow().strength_scale, 0.5);
        assert_eq!(half.borrow().roughness_scale, 0.5);

        assert!(shaker.shake_from_point(Vec3::ZERO, 5.0, &sustained(), None).is_none());
        assert_eq!(shaker.len(), 2);
    }

    #[test]
    fn test_update_sums_instances() {
        let mut shaker = Shaker::with_rng_seed(2);
        shaker.shake(&sustained(), Some(10));
        shaker.shake(&sustained(), Some(-20));

        let mut a = ShakeInstance::with_seed(&sustained(), 10);
        let mut b = ShakeInstance::with_seed(&sustained(), -20);
        let noise = PerlinNoise::default();

        for i in 1..=10 {
            let tick = FrameTick(i);
            let total = shaker.update(0.05, tick);
            let expected = a.advance(&noise, 0.05, tick) + b.advance(&noise, 0.05, tick);
            assert_eq!(total, expected);
            assert_eq!(shaker.offset(), expected);
        }
    }

    #[test]
    fn test_finished_shake_pruned_next_update() {
        let mut shaker = Shaker::with_rng_seed(3);
        let handle = shaker.shake(&ShakeParameters::one_shot(1.0, 1.0), None);

        // Fade in, auto fade-out, stopped
        shaker.update(0.1, FrameTick(1));
        shaker.update(0.1, FrameTick(2));
        assert_eq!(handle.borrow().state(), ShakeState::Stopped);
        assert_eq!(shaker.len(), 1);

        shaker.update(0.1, FrameTick(3));
        assert!(shaker.is_empty());
        assert_eq!(shaker.offset(), ShakeResult::ZERO);
    }

    #[test]
    fn test_stopped_shake_kept_without_removal_flag() {
        let mut shaker = Shaker::with_rng_seed(4);
        let handle = shaker.shake(&ShakeParameters::sustained(1.0, 1.0), None);
        shaker.update(0.1, FrameTick(1));
        handle.borrow_mut().stop(0.0, false);
        for i in 2..6 {
            shaker.update(0.1, FrameTick(i));
        }
        assert_eq!(handle.borrow().state(), ShakeState::Stopped);
        assert_eq!(shaker.len(), 1);
        assert_eq!(shaker.offset(), ShakeResult::ZERO);

        handle.borrow_mut().start(0.0);
        shaker.update(0.1, FrameTick(6));
        let offset = shaker.update(0.1, FrameTick(7));
        assert_ne!(offset, ShakeResult::ZERO);
    }

    #[test]
    fn test_pruning_does_not_skip_neighbours() {
        let mut shaker = Shaker::with_rng_seed(5);
        let params = ShakeParameters::sustained(1.0, 1.0);
        let handles: Vec<_> = (0..6).map(|i| shaker.shake(&params, Some(i))).collect();
        shaker.update(0.1, FrameTick(1));

        for h in handles.iter().step_by(2) {
            h.borrow_mut().stop(0.0, true);
        }
        shaker.update(0.1, FrameTick(2));
        shaker.update(0.1, FrameTick(3));

        assert_eq!(shaker.len(), 3);
        for h in handles.iter().skip(1).step_by(2) {
            assert!(shaker.active_shakes().iter().any(|s| Rc::ptr_eq(s, h)));
            assert_eq!(h.borrow().state(), ShakeState::Sustained);
        }
    }

    #[test]
    fn test_shared_shake_advances_once_per_tick() {
        let params = ShakeParameters::sustained(1.0, 1.0).with_fades(1.0, 1.0);
        let shared = new_shake(&params, Some(9));
        let mut first = Shaker::with_rng_seed(6);
        let mut second = Shaker::with_rng_seed(7);
        first.add_shake(Rc::clone(&shared));
        second.add_shake(Rc::clone(&shared));

        for i in 1..=5 {
            let a = first.update(0.1, FrameTick(i));
            let b = second.update(0.1, FrameTick(i));
            assert_eq!(a, b);
        }
        assert!((shared.borrow().fade_progress() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_extreme_input_keeps_updating() {
        let mut shaker = Shaker::with_rng_seed(1);
        shaker.shake(&ShakeParameters::sustained(1.0, 1.0e25), Some(3));
        for i in 1..5 {
            assert!(shaker.update(0.1, FrameTick(i)).position.is_finite());
        }
        for (i, dt) in [f32::INFINITY, f32::NAN].into_iter().enumerate() {
            assert!(shaker.update(dt, FrameTick(10 + i as u64)).position.is_finite());
        }
        assert_eq!(shaker.len(), 1);
    }

    #[test]
    fn test_rng_seed_reproducible() {
        let mut a = Shaker::with_rng_seed(42);
        let mut b = Shaker::with_rng_seed(42);
        let sa = a.shake(&sustained(), None);
        let sb = b.shake(&sustained(), None);
        assert_eq!(sa.borrow().seed(), sb.borrow().seed());
    }

    proptest! {
        #[test]
        fn prop_falloff_in_unit_range(distance in 0.0f32..1000.0, max_distance in 0.001f32..1000.0) {
            match distance_falloff(distance, max_distance) {
                Some(scale) => {
                    prop_assert!(distance < max_distance);
                    prop_assert!((0.0..=1.0).contains(&scale));
                }
                None => prop_assert!(distance >= max_distance),
            }
        }
    }
}

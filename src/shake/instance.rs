//! A single running shake
//!
//! Each instance walks through a small fade state machine:
//!
//! ```text
//! FadingIn ──► Sustained ──stop()──► FadingOut ──► Stopped
//!     │                                  ▲            │
//!     └── (OneShot, auto) ───────────────┘            │
//!     ▲                                               │
//!     └─────────────────── start() ───────────────────┘
//! ```
//!
//! Offsets are sampled from coherent noise at coordinates derived from a
//! noise clock and the instance seed. Fading scales both the amplitude and the
//! speed of the noise walk, and pausing freezes the walk without touching the
//! amplitude.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::params::{ShakeParameters, ShakeType};
use super::result::ShakeResult;
use crate::clock::FrameTick;
use crate::consts::{SEED_MAX, SEED_MIN};
use crate::noise::NoiseSource;

/// Lifecycle state of a shake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShakeState {
    FadingIn,
    /// Full strength, holding until stopped
    Sustained,
    FadingOut,
    /// Fully faded out; only `start` leaves this state
    Stopped,
}

/// Draw a shake seed uniformly from the seed range
pub fn draw_seed<R: Rng>(rng: &mut R) -> i32 {
    rng.random_range(SEED_MIN..SEED_MAX)
}

/// Clamp to [0, 1], mapping NaN to 0
#[inline]
fn clamp01(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// One shake with its own timers
#[derive(Debug, Clone)]
pub struct ShakeInstance {
    parameters: ShakeParameters,
    /// Live multiplier on strength (e.g. distance falloff)
    pub strength_scale: f32,
    /// Live multiplier on roughness
    pub roughness_scale: f32,
    /// Whether owners should drop this shake once it reaches `Stopped`
    pub remove_when_stopped: bool,

    state: ShakeState,
    is_paused: bool,

    base_seed: i32,
    seed_half: f32,
    seed_third: f32,
    seed_quarter: f32,

    noise_time: f32,

    fade_progress: f32,
    fade_in_time: f32,
    fade_out_time: f32,

    pause_progress: f32,
    pause_fade_time: f32,

    last_tick: Option<FrameTick>,
    last_result: ShakeResult,
}

impl ShakeInstance {
    /// Create a shake, drawing a seed from the thread RNG if none is given
    pub fn new(parameters: &ShakeParameters, seed: Option<i32>) -> Self {
        let seed = seed.unwrap_or_else(|| draw_seed(&mut rand::rng()));
        Self::with_seed(parameters, seed)
    }

    /// Create a shake, drawing a missing seed from `rng`
    pub fn with_rng<R: Rng>(parameters: &ShakeParameters, seed: Option<i32>, rng: &mut R) -> Self {
        let seed = seed.unwrap_or_else(|| draw_seed(rng));
        Self::with_seed(parameters, seed)
    }

    /// Create a shake with an explicit seed
    pub fn with_seed(parameters: &ShakeParameters, seed: i32) -> Self {
        Self {
            parameters: *parameters,
            strength_scale: 1.0,
            roughness_scale: 1.0,
            remove_when_stopped: false,
            state: ShakeState::FadingIn,
            is_paused: false,
            base_seed: seed,
            seed_half: seed as f32 / 2.0,
            seed_third: seed as f32 / 3.0,
            seed_quarter: seed as f32 / 4.0,
            noise_time: seed as f32,
            fade_progress: 0.0,
            fade_in_time: parameters.fade_in,
            fade_out_time: parameters.fade_out,
            pause_progress: 0.0,
            pause_fade_time: 0.0,
            last_tick: None,
            last_result: ShakeResult::ZERO,
        }
    }

    /// This shake's own copy of its profile
    pub fn parameters(&self) -> &ShakeParameters {
        &self.parameters
    }

    /// Edit this shake's copy of its profile; the source profile is untouched
    pub fn parameters_mut(&mut self) -> &mut ShakeParameters {
        &mut self.parameters
    }

    pub fn state(&self) -> ShakeState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Stopped and flagged for removal
    pub fn is_finished(&self) -> bool {
        self.state == ShakeState::Stopped && self.remove_when_stopped
    }

    pub fn seed(&self) -> i32 {
        self.base_seed
    }

    /// Fade envelope in [0, 1]
    pub fn fade_progress(&self) -> f32 {
        self.fade_progress
    }

    /// Pause envelope in [0, 1]; 1 means fully frozen
    pub fn pause_progress(&self) -> f32 {
        self.pause_progress
    }

    /// Position of the noise walk
    pub fn noise_time(&self) -> f32 {
        self.noise_time
    }

    pub fn current_strength(&self) -> f32 {
        self.parameters.strength * self.fade_progress * self.strength_scale
    }

    pub fn current_roughness(&self) -> f32 {
        self.parameters.roughness * self.fade_progress * self.roughness_scale
    }

    /// Offsets for the current state, without advancing anything
    pub fn sample<N: NoiseSource>(&self, noise: &N) -> ShakeResult {
        let t = self.noise_time;
        let base = self.base_seed as f32;
        let strength = self.current_strength();

        let position = Vec3::new(
            noise.sample_signed(t + self.seed_half, base),
            noise.sample_signed(base, t),
            noise.sample_signed(self.seed_quarter + t, base + t),
        );
        let rotation = Vec3::new(
            noise.sample_signed(t - base, self.seed_quarter),
            noise.sample_signed(base, t + self.seed_third),
            noise.sample_signed(base + t, self.seed_half + t),
        );

        ShakeResult {
            position: position * strength * self.parameters.position_influence,
            rotation: rotation * strength * self.parameters.rotation_influence,
        }
    }

    /// Return the offsets entering this tick, then advance the timers by `dt`
    ///
    /// A second call with the same `tick` returns the offsets handed out by the
    /// first call and leaves every timer alone, so shakers sharing one
    /// instance all see the same motion.
    pub fn advance<N: NoiseSource>(&mut self, noise: &N, dt: f32, tick: FrameTick) -> ShakeResult {
        if self.last_tick == Some(tick) {
            return self.last_result;
        }
        let result = self.sample(noise);
        let dt = if dt.is_finite() { dt } else { 0.0 };

        if self.pause_fade_time > 0.0 {
            let step = dt / self.pause_fade_time;
            if self.is_paused {
                self.pause_progress += step;
            } else {
                self.pause_progress -= step;
            }
        }
        self.pause_progress = clamp01(self.pause_progress);

        let walk = (1.0 - self.pause_progress) * dt * self.current_roughness();
        if walk.is_finite() {
            self.noise_time += walk;
        }

        match self.state {
            ShakeState::FadingIn => {
                if self.fade_in_time > 0.0 {
                    self.fade_progress += dt / self.fade_in_time;
                } else {
                    self.fade_progress = 1.0;
                }
            }
            ShakeState::FadingOut => {
                if self.fade_out_time > 0.0 {
                    self.fade_progress -= dt / self.fade_out_time;
                } else {
                    self.fade_progress = 0.0;
                }
            }
            ShakeState::Sustained | ShakeState::Stopped => {}
        }
        self.fade_progress = clamp01(self.fade_progress);

        match self.state {
            ShakeState::FadingIn if self.fade_progress == 1.0 => match self.parameters.shake_type {
                ShakeType::Sustained => self.state = ShakeState::Sustained,
                ShakeType::OneShot => self.stop(self.parameters.fade_out, true),
            },
            ShakeState::FadingOut if self.fade_progress == 0.0 => self.state = ShakeState::Stopped,
            _ => {}
        }

        self.last_tick = Some(tick);
        self.last_result = result;
        result
    }

    /// Fade (back) in over `fade_time` seconds, continuing from the current envelope
    pub fn start(&mut self, fade_time: f32) {
        self.fade_in_time = fade_time;
        self.state = ShakeState::FadingIn;
    }

    /// Fade out over `fade_time` seconds
    pub fn stop(&mut self, fade_time: f32, remove_when_stopped: bool) {
        self.fade_out_time = fade_time;
        self.remove_when_stopped = remove_when_stopped;
        self.state = ShakeState::FadingOut;
    }

    /// Freeze the noise walk over `fade_time` seconds (instantly if <= 0)
    pub fn pause(&mut self, fade_time: f32) {
        self.is_paused = true;
        self.pause_fade_time = fade_time;
        if fade_time <= 0.0 {
            self.pause_progress = 1.0;
        }
    }

    /// Unfreeze the noise walk over `fade_time` seconds (instantly if <= 0)
    pub fn resume(&mut self, fade_time: f32) {
        self.is_paused = false;
        self.pause_fade_time = fade_time;
        if fade_time <= 0.0 {
            self.pause_progress = 0.0;
        }
    }

    pub fn toggle_pause(&mut self, fade_time: f32) {
        if self.is_paused {
            self.resume(fade_time);
        } else {
            self.pause(fade_time);
        }
    }
}

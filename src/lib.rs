//! MilkShake - noise-driven camera/transform shake
//!
//! Core modules:
//! - `noise`: Coherent noise sources
//! - `shake`: Shake instances, shakers and the broadcast registry
//! - `clock`: Frame ticks and fixed-timestep accumulation
//! - `presets`: Named, data-driven shake profiles
//! - `settings`: Player preferences applied to the final offset
//!
//! The engine only computes offsets. Applying them to a camera or transform
//! is up to the host.

pub mod clock;
pub mod error;
pub mod noise;
pub mod presets;
pub mod settings;
pub mod shake;

pub use clock::{FrameClock, FrameTick};
pub use error::PresetError;
pub use presets::{BuiltinPresets, PresetBank, PresetLoader, ShakePreset};
pub use settings::Settings;
pub use shake::{
    ShakeHandle, ShakeInstance, ShakeParameters, ShakeResult, ShakeState, ShakeType, Shaker,
    ShakerHandle, ShakerRegistry, new_shake,
};

/// Engine constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Random shake seeds are drawn from `SEED_MIN..SEED_MAX`
    pub const SEED_MIN: i32 = -10_000;
    pub const SEED_MAX: i32 = 10_000;
}

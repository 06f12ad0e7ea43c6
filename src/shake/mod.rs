//! Shake engine
//!
//! Everything here is plain arithmetic driven by the host's frame loop:
//! - No rendering or engine dependencies
//! - Seeded noise only, so equal seeds give equal motion
//! - Single-threaded; shared handles use `Rc<RefCell<_>>`

pub mod instance;
pub mod params;
pub mod registry;
pub mod result;
pub mod shaker;

pub use instance::{ShakeInstance, ShakeState, draw_seed};
pub use params::{ShakeParameters, ShakeType};
pub use registry::{ShakerHandle, ShakerRegistry};
pub use result::ShakeResult;
pub use shaker::{ShakeHandle, Shaker, distance_falloff, new_shake};

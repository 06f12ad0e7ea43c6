//! Shake profiles
//!
//! A [`ShakeParameters`] value is plain data. Instances copy it on creation,
//! so editing the source afterwards never reaches a running shake.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How a shake ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShakeType {
    /// Fades in, then fades out on its own
    #[default]
    OneShot,
    /// Fades in and holds until stopped
    Sustained,
}

/// One shake profile
///
/// No field is range-checked. Negative strength or influence simply
/// produces mirrored output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShakeParameters {
    #[serde(default)]
    pub shake_type: ShakeType,
    /// Magnitude of the shake
    pub strength: f32,
    /// Speed of the noise walk. Higher is faster and noisier, 0 freezes it.
    pub roughness: f32,
    /// Fade-in duration (seconds)
    #[serde(default)]
    pub fade_in: f32,
    /// Fade-out duration (seconds)
    #[serde(default)]
    pub fade_out: f32,
    /// Per-axis multiplier on positional offset
    #[serde(default = "default_influence")]
    pub position_influence: Vec3,
    /// Per-axis multiplier on rotational offset (degrees)
    #[serde(default = "default_influence")]
    pub rotation_influence: Vec3,
}

fn default_influence() -> Vec3 {
    Vec3::ONE
}

impl Default for ShakeParameters {
    fn default() -> Self {
        Self {
            shake_type: ShakeType::OneShot,
            strength: 1.0,
            roughness: 1.0,
            fade_in: 0.0,
            fade_out: 0.0,
            position_influence: Vec3::ONE,
            rotation_influence: Vec3::ONE,
        }
    }
}

impl ShakeParameters {
    pub fn new(shake_type: ShakeType, strength: f32, roughness: f32) -> Self {
        Self {
            shake_type,
            strength,
            roughness,
            ..Default::default()
        }
    }

    pub fn one_shot(strength: f32, roughness: f32) -> Self {
        Self::new(ShakeType::OneShot, strength, roughness)
    }

    pub fn sustained(strength: f32, roughness: f32) -> Self {
        Self::new(ShakeType::Sustained, strength, roughness)
    }

    pub fn with_fades(mut self, fade_in: f32, fade_out: f32) -> Self {
        self.fade_in = fade_in;
        self.fade_out = fade_out;
        self
    }

    pub fn with_position_influence(mut self, influence: Vec3) -> Self {
        self.position_influence = influence;
        self
    }

    pub fn with_rotation_influence(mut self, influence: Vec3) -> Self {
        self.rotation_influence = influence;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let p = ShakeParameters::sustained(2.0, 5.0)
            .with_fades(0.5, 1.5)
            .with_position_influence(Vec3::new(1.0, -1.0, 0.0))
            .with_rotation_influence(Vec3::ZERO);
        assert_eq!(p.shake_type, ShakeType::Sustained);
        assert_eq!(p.strength, 2.0);
        assert_eq!(p.roughness, 5.0);
        assert_eq!(p.fade_in, 0.5);
        assert_eq!(p.fade_out, 1.5);
        assert_eq!(p.position_influence, Vec3::new(1.0, -1.0, 0.0));
        assert_eq!(p.rotation_influence, Vec3::ZERO);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let json = r#"{ "strength": 3.0, "roughness": 10.0 }"#;
        let p: ShakeParameters = serde_json::from_str(json).unwrap();
        assert_eq!(p.shake_type, ShakeType::OneShot);
        assert_eq!(p.fade_in, 0.0);
        assert_eq!(p.position_influence, Vec3::ONE);
    }
}

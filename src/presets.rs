//! Named shake profiles
//!
//! Profiles are authored as data and loaded through a [`PresetLoader`]:
//! - [`BuiltinPresets`]: a small stock library
//! - [`JsonFileLoader`]: a versioned JSON file on disk
//! - [`JsonStrLoader`]: the same format from memory

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::PresetError;
use crate::shake::ShakeParameters;

/// Current preset file format version
pub const PRESET_FORMAT_VERSION: u32 = 1;

/// A named shake profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShakePreset {
    pub name: String,
    #[serde(flatten)]
    pub parameters: ShakeParameters,
}

impl ShakePreset {
    pub fn new(name: impl Into<String>, parameters: ShakeParameters) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }
}

/// A set of presets, looked up by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetBank {
    pub version: u32,
    pub presets: Vec<ShakePreset>,
}

impl Default for PresetBank {
    fn default() -> Self {
        Self {
            version: PRESET_FORMAT_VERSION,
            presets: Vec::new(),
        }
    }
}

impl PresetBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a bank through any loader
    pub fn load<L: PresetLoader>(loader: &L) -> Result<Self, PresetError> {
        loader.load()
    }

    /// Parse a bank from JSON, rejecting unknown format versions
    pub fn from_json(json: &str) -> Result<Self, PresetError> {
        let bank: PresetBank = serde_json::from_str(json)?;
        if bank.version != PRESET_FORMAT_VERSION {
            return Err(PresetError::UnsupportedVersion {
                found: bank.version,
                expected: PRESET_FORMAT_VERSION,
            });
        }
        Ok(bank)
    }

    pub fn to_json(&self) -> Result<String, PresetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add a preset, replacing any existing one with the same name
    pub fn insert(&mut self, preset: ShakePreset) {
        match self.presets.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    /// Overlay `other` on top of this bank
    pub fn merge(&mut self, other: PresetBank) {
        for preset in other.presets {
            self.insert(preset);
        }
    }

    pub fn get(&self, name: &str) -> Result<&ShakePreset, PresetError> {
        self.presets
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| PresetError::UnknownPreset(name.to_string()))
    }

    /// Copy of a preset's parameters
    pub fn parameters(&self, name: &str) -> Result<ShakeParameters, PresetError> {
        self.get(name).map(|p| p.parameters)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// A source of shake presets
pub trait PresetLoader {
    fn load(&self) -> Result<PresetBank, PresetError>;
}

/// Loads a preset bank from a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    path: PathBuf,
}

impl JsonFileLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl PresetLoader for JsonFileLoader {
    fn load(&self) -> Result<PresetBank, PresetError> {
        let json = std::fs::read_to_string(&self.path)?;
        let bank = PresetBank::from_json(&json)?;
        log::info!("Loaded {} shake preset(s) from {}", bank.len(), self.path.display());
        Ok(bank)
    }
}

/// Loads a preset bank from JSON text
#[derive(Debug, Clone, Copy)]
pub struct JsonStrLoader<'a>(pub &'a str);

impl PresetLoader for JsonStrLoader<'_> {
    fn load(&self) -> Result<PresetBank, PresetError> {
        PresetBank::from_json(self.0)
    }
}

/// Stock library of common camera shakes
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPresets;

impl BuiltinPresets {
    /// Sharp blast: instant hit, long tail, mostly pitch
    pub fn explosion() -> ShakeParameters {
        ShakeParameters::one_shot(5.0, 10.0)
            .with_fades(0.0, 1.5)
            .with_position_influence(Vec3::splat(0.25))
            .with_rotation_influence(Vec3::new(4.0, 1.0, 1.0))
    }

    /// Short knock, e.g. a collision or landing
    pub fn impact() -> ShakeParameters {
        ShakeParameters::one_shot(2.0, 8.0)
            .with_fades(0.0, 0.4)
            .with_position_influence(Vec3::new(0.3, 0.3, 0.0))
            .with_rotation_influence(Vec3::new(1.0, 1.0, 2.0))
    }

    /// Slow rolling ground motion
    pub fn earthquake() -> ShakeParameters {
        ShakeParameters::sustained(0.6, 3.5)
            .with_fades(2.0, 10.0)
            .with_position_influence(Vec3::splat(0.25))
            .with_rotation_influence(Vec3::new(1.0, 1.0, 4.0))
    }

    /// Gentle sway of a hand-held camera
    pub fn handheld_camera() -> ShakeParameters {
        ShakeParameters::sustained(1.0, 0.25)
            .with_fades(5.0, 10.0)
            .with_position_influence(Vec3::ZERO)
            .with_rotation_influence(Vec3::new(1.0, 0.5, 0.5))
    }

    /// Fast engine-like buzz
    pub fn vibration() -> ShakeParameters {
        ShakeParameters::sustained(0.4, 20.0)
            .with_fades(2.0, 2.0)
            .with_position_influence(Vec3::new(0.0, 0.15, 0.0))
            .with_rotation_influence(Vec3::new(1.25, 0.0, 4.0))
    }

    /// Bumpy ride
    pub fn rough_driving() -> ShakeParameters {
        ShakeParameters::sustained(1.0, 1.0)
            .with_fades(2.0, 1.0)
            .with_position_influence(Vec3::ZERO)
            .with_rotation_influence(Vec3::ONE)
    }

    pub fn bank() -> PresetBank {
        PresetBank {
            version: PRESET_FORMAT_VERSION,
            presets: vec![
                ShakePreset::new("explosion", Self::explosion()),
                ShakePreset::new("impact", Self::impact()),
                ShakePreset::new("earthquake", Self::earthquake()),
                ShakePreset::new("handheld_camera", Self::handheld_camera()),
                ShakePreset::new("vibration", Self::vibration()),
                ShakePreset::new("rough_driving", Self::rough_driving()),
            ],
        }
    }
}

impl PresetLoader for BuiltinPresets {
    fn load(&self) -> Result<PresetBank, PresetError> {
        Ok(Self::bank())
    }
}

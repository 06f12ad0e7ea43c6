//! Player-facing shake preferences
//!
//! Applied on top of the aggregate offset a shaker produces. Persisted as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::shake::ShakeResult;

/// Shake preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Screen shake on explosions/impacts
    pub screen_shake: bool,
    /// Global multiplier on shake offsets (0.0 - 2.0)
    pub intensity: f32,

    // === Accessibility ===
    /// Reduced motion (disables shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            intensity: 1.0,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Upper bound for `intensity`
    pub const MAX_INTENSITY: f32 = 2.0;

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Multiplier actually applied to offsets
    pub fn effective_intensity(&self) -> f32 {
        if self.effective_screen_shake() {
            self.intensity.clamp(0.0, Self::MAX_INTENSITY)
        } else {
            0.0
        }
    }

    /// Scale an aggregate offset by these preferences
    pub fn apply(&self, result: ShakeResult) -> ShakeResult {
        result.scaled(self.effective_intensity())
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn sample() -> ShakeResult {
        ShakeResult::new(Vec3::new(1.0, -2.0, 0.5), Vec3::new(4.0, 0.0, -1.0))
    }

    #[test]
    fn test_default_passes_through() {
        assert_eq!(Settings::default().apply(sample()), sample());
    }

    #[test]
    fn test_reduced_motion_disables() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());
        assert_eq!(settings.apply(sample()), ShakeResult::ZERO);
    }

    #[test]
    fn test_intensity_clamped() {
        let settings = Settings {
            intensity: 10.0,
            ..Default::default()
        };
        assert_eq!(settings.effective_intensity(), Settings::MAX_INTENSITY);
        assert_eq!(settings.apply(sample()), sample().scaled(2.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "intensity": 0.5 }"#).unwrap();
        assert!(settings.screen_shake);
        assert_eq!(settings.intensity, 0.5);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("milkshake_settings_{}.json", std::process::id()));
        let settings = Settings {
            screen_shake: false,
            intensity: 0.7,
            reduced_motion: true,
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(!loaded.screen_shake);
        assert_eq!(loaded.intensity, 0.7);
        assert!(loaded.reduced_motion);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let loaded = Settings::load("/nonexistent/milkshake/settings.json");
        assert!(loaded.screen_shake);
        assert_eq!(loaded.intensity, 1.0);
    }
}

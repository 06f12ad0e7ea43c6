//! Errors for loading authored shake data

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("failed to read preset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed preset data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    #[error("unsupported preset format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

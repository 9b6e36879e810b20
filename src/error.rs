//! Error types for the I/O and parsing layers.
//!
//! Pattern generation itself never fails; only loading, saving and text
//! parsing report errors.

#[derive(Debug, thiserror::Error)]
pub enum ArtError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Settings error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Unknown pattern kind: {0}")]
    UnknownKind(String),
}

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the ruler sprite
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Failed to read asset {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Invalid sprite dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Errors that can occur while loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

//! Error types for config loading and processor construction.
//!
//! This module provides error handling for:
//! - Config file reading and YAML parsing
//! - Color space lookup
//! - Transform chain compilation

use std::path::PathBuf;
use thiserror::Error;

/// Result type for OCIO operations.
pub type OcioResult<T> = Result<T, OcioError>;

/// Errors that can occur during OCIO operations.
#[derive(Debug, Error)]
pub enum OcioError {
    /// I/O error reading config files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Config file not found.
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// Invalid config version.
    #[error("unsupported config version: {version} (supported: 1.x, 2.x)")]
    UnsupportedVersion {
        /// Version string from config.
        version: String,
    },

    /// Color space not found in config.
    #[error("color space not found: {name}")]
    ColorSpaceNotFound {
        /// Name of the missing color space.
        name: String,
    },

    /// Unknown built-in config name.
    #[error("unknown built-in config: {name}")]
    UnknownBuiltin {
        /// Requested name.
        name: String,
    },

    /// Invalid transform definition.
    #[error("invalid transform: {reason}")]
    InvalidTransform {
        /// Description of what's wrong.
        reason: String,
    },

    /// Transform kind this crate cannot evaluate.
    #[error("unsupported transform: {kind}")]
    UnsupportedTransform {
        /// Tag of the transform as written in the config.
        kind: String,
    },

    /// Transform processing error.
    #[error("transform error: {0}")]
    Transform(String),
}

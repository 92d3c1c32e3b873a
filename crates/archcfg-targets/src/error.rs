//! Error types for target operations.

use crate::arch::Arch;

/// Errors that can occur during target operations.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// The architecture component of a triple is not recognized.
    #[error("unknown architecture '{0}'")]
    UnknownArch(String),

    /// The triple has too few components.
    #[error("malformed target triple '{triple}': expected arch-vendor-os[-environment]")]
    MalformedTriple {
        /// The triple as given.
        triple: String,
    },

    /// No configuration rule exists for the architecture.
    #[error("no target configuration rule for architecture '{0}'")]
    UnsupportedArch(Arch),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;

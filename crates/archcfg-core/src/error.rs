//! Error types for option set construction.

/// Errors that can occur while turning argument words into an [`OptionSet`](crate::OptionSet).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    /// The word does not name any known option.
    #[error("unknown argument: '{0}'")]
    Unknown(String),

    /// A value-taking option was given without `=VALUE`.
    #[error("option '{spelling}' requires a value ('{spelling}=VALUE')")]
    MissingValue {
        /// The option spelling, including the trailing `=`.
        spelling: &'static str,
    },

    /// A flag was given a value it does not take.
    #[error("option '{spelling}' does not take a value")]
    UnexpectedValue {
        /// The flag spelling.
        spelling: &'static str,
    },
}

/// Result type for option operations.
pub type Result<T> = std::result::Result<T, OptionError>;

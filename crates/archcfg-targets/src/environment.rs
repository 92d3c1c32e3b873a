//! Environment model.
//!
//! The environment component of a triple. For some architecture families it
//! also carries the default floating-point ABI (the `sf`/`f32`/`f64` suffixes).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment tag of a target triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Unmarked GNU environment; the general-purpose default.
    Gnu,
    /// GNU with soft-float calling convention.
    GnuSf,
    /// GNU with single-precision hard-float calling convention.
    GnuF32,
    /// GNU with double-precision hard-float calling convention (legacy spelling).
    GnuF64,
    Musl,
    /// Absent or not recognized.
    Unknown,
}

impl Environment {
    /// Map an environment word to its tag. Unrecognized words are [`Environment::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "gnu" => Environment::Gnu,
            "gnusf" => Environment::GnuSf,
            "gnuf32" => Environment::GnuF32,
            "gnuf64" => Environment::GnuF64,
            "musl" => Environment::Musl,
            _ => Environment::Unknown,
        }
    }

    /// The triple spelling, or `None` for [`Environment::Unknown`].
    pub fn name(self) -> Option<&'static str> {
        match self {
            Environment::Gnu => Some("gnu"),
            Environment::GnuSf => Some("gnusf"),
            Environment::GnuF32 => Some("gnuf32"),
            Environment::GnuF64 => Some("gnuf64"),
            Environment::Musl => Some("musl"),
            Environment::Unknown => None,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("unknown"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags() {
        assert_eq!(Environment::from_name("gnu"), Environment::Gnu);
        assert_eq!(Environment::from_name("gnusf"), Environment::GnuSf);
        assert_eq!(Environment::from_name("gnuf32"), Environment::GnuF32);
        assert_eq!(Environment::from_name("gnuf64"), Environment::GnuF64);
        assert_eq!(Environment::GnuF32.name(), Some("gnuf32"));
    }

    #[test]
    fn unrecognized_is_unknown() {
        assert_eq!(Environment::from_name("eabi"), Environment::Unknown);
        assert_eq!(Environment::from_name(""), Environment::Unknown);
        assert_eq!(Environment::Unknown.name(), None);
        assert_eq!(Environment::Unknown.to_string(), "unknown");
    }
}

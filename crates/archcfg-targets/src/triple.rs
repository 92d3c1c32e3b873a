//! Target triple.
//!
//! The already-parsed view of a triple that the resolvers consume: the
//! architecture (and through it the word width) plus the environment tag.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arch::{Arch, WordWidth};
use crate::environment::Environment;

/// A target triple, `arch-vendor-os[-environment]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Triple {
    pub arch: Arch,
    pub vendor: String,
    pub os: String,
    pub environment: Environment,
}

impl Triple {
    /// Compose a triple from its parts.
    pub fn new(
        arch: Arch,
        vendor: impl Into<String>,
        os: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            arch,
            vendor: vendor.into(),
            os: os.into(),
            environment,
        }
    }

    /// `<arch>-unknown-linux-<env>`.
    pub fn linux(arch: Arch, environment: Environment) -> Self {
        Self::new(arch, "unknown", "linux", environment)
    }

    pub fn word_width(&self) -> WordWidth {
        self.arch.word_width()
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.arch, self.vendor, self.os)?;
        if let Some(env) = self.environment.name() {
            write!(f, "-{env}")?;
        }
        Ok(())
    }
}

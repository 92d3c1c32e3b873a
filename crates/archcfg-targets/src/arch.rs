//! Architecture model.
//!
//! Identifies the architecture named by a triple and the word-width class
//! that selects between the narrow and wide calling-convention families.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TargetError;

/// Native word width of an architecture variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordWidth {
    W32,
    W64,
}

impl WordWidth {
    pub fn bits(self) -> u32 {
        match self {
            WordWidth::W32 => 32,
            WordWidth::W64 => 64,
        }
    }
}

/// Architectures recognized in target triples.
///
/// Only some of them have a configuration rule; see [`crate::rule::ArchRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    LoongArch32,
    LoongArch64,
    X86_64,
    AArch64,
    RiscV64,
}

impl Arch {
    /// The triple spelling of the architecture.
    pub fn name(self) -> &'static str {
        match self {
            Arch::LoongArch32 => "loongarch32",
            Arch::LoongArch64 => "loongarch64",
            Arch::X86_64 => "x86_64",
            Arch::AArch64 => "aarch64",
            Arch::RiscV64 => "riscv64",
        }
    }

    pub fn word_width(self) -> WordWidth {
        match self {
            Arch::LoongArch32 => WordWidth::W32,
            Arch::LoongArch64 | Arch::X86_64 | Arch::AArch64 | Arch::RiscV64 => WordWidth::W64,
        }
    }

    pub fn is_loongarch(self) -> bool {
        matches!(self, Arch::LoongArch32 | Arch::LoongArch64)
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Arch {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "loongarch32" => Ok(Arch::LoongArch32),
            "loongarch64" => Ok(Arch::LoongArch64),
            "x86_64" | "amd64" => Ok(Arch::X86_64),
            "aarch64" | "arm64" => Ok(Arch::AArch64),
            "riscv64" => Ok(Arch::RiscV64),
            _ => Err(TargetError::UnknownArch(s.to_string())),
        }
    }
}

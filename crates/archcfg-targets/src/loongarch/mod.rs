//! LoongArch configuration rule.
//!
//! LoongArch has two word-width variants (LA32, LA64) that share one option
//! surface. The ABI name combines the width prefix (`ilp32`/`lp64`) with a
//! float suffix (`s`/`f`/`d`).

pub mod abi;
pub mod features;

use std::fmt;
use std::str::FromStr;

use archcfg_core::OptionKind;
use serde::Serialize;

use crate::arch::WordWidth;
use crate::profile::{ArchProfile, FeatureToggle, ProfileTable};

pub use abi::{resolve_abi, AbiResolution, ResolvedAbi};
pub use features::{resolve_features, FeatureResolution};

/// Profile selected for LA64 when `-march=` is absent. LA32 has no default.
pub const DEFAULT_LA64_ARCH: &str = "loongarch64";

/// The mutually exclusive `-m*-float` family, highest priority for both resolvers.
pub const FLOAT_OPTIONS: [OptionKind; 3] = [
    OptionKind::DoubleFloat,
    OptionKind::SingleFloat,
    OptionKind::SoftFloat,
];

/// `-munaligned-access` / `-mno-unaligned-access` and their aliases.
pub const ALIGNMENT_OPTIONS: [OptionKind; 2] =
    [OptionKind::UnalignedAccess, OptionKind::NoUnalignedAccess];

/// Basic floating-point instructions (single precision).
pub const FEATURE_F: &str = "f";
/// Double-precision floating-point instructions.
pub const FEATURE_D: &str = "d";
/// Unaligned memory access.
pub const FEATURE_UAL: &str = "ual";

const LOONGARCH64_FEATURES: &[FeatureToggle] = &[
    FeatureToggle::enable("64bit"),
    FeatureToggle::enable(FEATURE_F),
    FeatureToggle::enable(FEATURE_D),
    FeatureToggle::enable(FEATURE_UAL),
];

const LA464_FEATURES: &[FeatureToggle] = &[
    FeatureToggle::enable("64bit"),
    FeatureToggle::enable(FEATURE_F),
    FeatureToggle::enable(FEATURE_D),
    FeatureToggle::enable("lsx"),
    FeatureToggle::enable("lasx"),
    FeatureToggle::enable(FEATURE_UAL),
];

const LOONGARCH_PROFILES: &[ArchProfile] = &[
    ArchProfile::new(
        "loongarch64",
        "Generic LA64 with double-precision FPU and unaligned access",
        LOONGARCH64_FEATURES,
    ),
    ArchProfile::new(
        "la464",
        "LA464 core: generic LA64 plus LSX and LASX vector extensions",
        LA464_FEATURES,
    ),
];

/// Built-in LoongArch architecture profiles.
pub static PROFILES: ProfileTable = ProfileTable::new("LoongArch", LOONGARCH_PROFILES);

/// Floating-point capability, the part of the ABI after the width prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatAbi {
    Soft,
    Single,
    Double,
}

impl FloatAbi {
    /// The `-m*-float` option implying this capability.
    pub fn from_option(kind: OptionKind) -> Option<Self> {
        match kind {
            OptionKind::DoubleFloat => Some(FloatAbi::Double),
            OptionKind::SingleFloat => Some(FloatAbi::Single),
            OptionKind::SoftFloat => Some(FloatAbi::Soft),
            _ => None,
        }
    }

    /// Parse a `-mfpu=` value: `64`, `32`, `0` or `none`.
    pub fn from_fpu_value(value: &str) -> Option<Self> {
        match value {
            "64" => Some(FloatAbi::Double),
            "32" => Some(FloatAbi::Single),
            "0" | "none" => Some(FloatAbi::Soft),
            _ => None,
        }
    }

    /// FPU register width in bits (0 for soft-float).
    pub fn fpu_width(self) -> u32 {
        match self {
            FloatAbi::Soft => 0,
            FloatAbi::Single => 32,
            FloatAbi::Double => 64,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            FloatAbi::Soft => "s",
            FloatAbi::Single => "f",
            FloatAbi::Double => "d",
        }
    }

    /// The `f`/`d` toggles this capability implies, in append order.
    pub fn features(self) -> [FeatureToggle; 2] {
        match self {
            FloatAbi::Double => [
                FeatureToggle::enable(FEATURE_F),
                FeatureToggle::enable(FEATURE_D),
            ],
            FloatAbi::Single => [
                FeatureToggle::enable(FEATURE_F),
                FeatureToggle::disable(FEATURE_D),
            ],
            FloatAbi::Soft => [
                FeatureToggle::disable(FEATURE_F),
                FeatureToggle::disable(FEATURE_D),
            ],
        }
    }
}

/// The canonical LoongArch ABI names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoongArchAbi {
    Ilp32s,
    Ilp32f,
    Ilp32d,
    Lp64s,
    Lp64f,
    Lp64d,
}

impl LoongArchAbi {
    pub const ALL: [LoongArchAbi; 6] = [
        LoongArchAbi::Ilp32s,
        LoongArchAbi::Ilp32f,
        LoongArchAbi::Ilp32d,
        LoongArchAbi::Lp64s,
        LoongArchAbi::Lp64f,
        LoongArchAbi::Lp64d,
    ];

    pub fn new(width: WordWidth, float: FloatAbi) -> Self {
        match (width, float) {
            (WordWidth::W32, FloatAbi::Soft) => LoongArchAbi::Ilp32s,
            (WordWidth::W32, FloatAbi::Single) => LoongArchAbi::Ilp32f,
            (WordWidth::W32, FloatAbi::Double) => LoongArchAbi::Ilp32d,
            (WordWidth::W64, FloatAbi::Soft) => LoongArchAbi::Lp64s,
            (WordWidth::W64, FloatAbi::Single) => LoongArchAbi::Lp64f,
            (WordWidth::W64, FloatAbi::Double) => LoongArchAbi::Lp64d,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LoongArchAbi::Ilp32s => "ilp32s",
            LoongArchAbi::Ilp32f => "ilp32f",
            LoongArchAbi::Ilp32d => "ilp32d",
            LoongArchAbi::Lp64s => "lp64s",
            LoongArchAbi::Lp64f => "lp64f",
            LoongArchAbi::Lp64d => "lp64d",
        }
    }

    pub fn word_width(self) -> WordWidth {
        match self {
            LoongArchAbi::Ilp32s | LoongArchAbi::Ilp32f | LoongArchAbi::Ilp32d => WordWidth::W32,
            LoongArchAbi::Lp64s | LoongArchAbi::Lp64f | LoongArchAbi::Lp64d => WordWidth::W64,
        }
    }

    pub fn float_abi(self) -> FloatAbi {
        match self {
            LoongArchAbi::Ilp32s | LoongArchAbi::Lp64s => FloatAbi::Soft,
            LoongArchAbi::Ilp32f | LoongArchAbi::Lp64f => FloatAbi::Single,
            LoongArchAbi::Ilp32d | LoongArchAbi::Lp64d => FloatAbi::Double,
        }
    }
}

impl fmt::Display for LoongArchAbi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoongArchAbi {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoongArchAbi::ALL
            .into_iter()
            .find(|abi| abi.as_str() == s)
            .ok_or(())
    }
}

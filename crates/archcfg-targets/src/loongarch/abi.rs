//! ABI resolution.
//!
//! Precedence, first match wins:
//! 1. `-mdouble-float` / `-msingle-float` / `-msoft-float` (last one wins).
//!    Conflicting `-mabi=` or `-mfpu=` values are reported and ignored.
//! 2. `-mabi=`, passed through unmodified.
//! 3. `-mfpu=`.
//! 4. The triple's environment tag.

use std::fmt;

use archcfg_core::{Arg, DiagKey, Diagnostics, OptionKind, OptionSet};
use log::debug;
use serde::Serialize;

use super::{FloatAbi, LoongArchAbi, FLOAT_OPTIONS};
use crate::arch::WordWidth;
use crate::environment::Environment;
use crate::triple::Triple;

/// The resolved ABI name.
///
/// Usually one of [`LoongArchAbi`], but an explicit `-mabi=` value is
/// returned as written and only checked when code generation consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResolvedAbi(String);

impl ResolvedAbi {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The canonical ABI this name denotes, if it is one.
    pub fn canonical(&self) -> Option<LoongArchAbi> {
        self.0.parse().ok()
    }
}

impl From<LoongArchAbi> for ResolvedAbi {
    fn from(abi: LoongArchAbi) -> Self {
        ResolvedAbi(abi.as_str().to_string())
    }
}

impl fmt::Display for ResolvedAbi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output of [`resolve_abi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiResolution {
    /// Selected ABI name.
    pub abi: ResolvedAbi,
    /// Conflict warnings and `-mfpu=` errors, in emission order.
    pub diagnostics: Diagnostics,
}

/// The last `-m*-float` option and the capability it implies.
pub(crate) fn last_float_option(options: &OptionSet) -> Option<(&Arg, FloatAbi)> {
    options
        .last_of(&FLOAT_OPTIONS)
        .and_then(|a| FloatAbi::from_option(a.kind()).map(|f| (a, f)))
}

/// Default float ABI carried by the environment tag.
fn environment_default(environment: Environment) -> FloatAbi {
    match environment {
        Environment::GnuSf => FloatAbi::Soft,
        Environment::GnuF32 => FloatAbi::Single,
        // `gnuf64` used to be the canonical spelling of the D ABIs. The
        // unmarked `gnu` replaced it, but triples spelled the old way are
        // still in use, so it keeps meaning the same as `gnu`.
        Environment::GnuF64 | Environment::Gnu | Environment::Musl | Environment::Unknown => {
            FloatAbi::Double
        }
    }
}

/// Compute the ABI for a LoongArch triple and option set.
pub fn resolve_abi(triple: &Triple, options: &OptionSet) -> AbiResolution {
    let width: WordWidth = triple.word_width();
    let mut diagnostics = Diagnostics::new();

    // An empty `-mabi=` counts as absent.
    let mabi = options
        .last(OptionKind::Abi)
        .filter(|a| a.value().is_some_and(|v| !v.is_empty()));

    // `-mfpu=` is validated up front, even if a `-m*-float` option wins below.
    let mfpu = options.last(OptionKind::Fpu).and_then(|a| {
        let value = a.value().unwrap_or_default();
        match FloatAbi::from_fpu_value(value) {
            Some(fpu) => Some((a, fpu)),
            None => {
                diagnostics.emit(DiagKey::InvalidFpuWidth, [value]);
                None
            }
        }
    });

    if let Some((float_arg, implied)) = last_float_option(options) {
        let implied_abi = LoongArchAbi::new(width, implied);

        if let Some(abi_arg) = mabi {
            if abi_arg.value() != Some(implied_abi.as_str()) {
                diagnostics.emit(
                    DiagKey::ConflictingImpliedValue,
                    [
                        abi_arg.as_string(),
                        float_arg.as_string(),
                        implied_abi.to_string(),
                    ],
                );
            }
        }
        if let Some((fpu_arg, fpu)) = mfpu {
            if fpu != implied {
                diagnostics.emit(
                    DiagKey::ConflictingImpliedValue,
                    [
                        fpu_arg.as_string(),
                        float_arg.as_string(),
                        implied.fpu_width().to_string(),
                    ],
                );
            }
        }

        debug!("ABI {implied_abi} implied by {float_arg}");
        return AbiResolution {
            abi: implied_abi.into(),
            diagnostics,
        };
    }

    if let Some(abi_arg) = mabi {
        let value = abi_arg.value().unwrap_or_default();
        debug!("ABI {value} from {abi_arg}");
        return AbiResolution {
            abi: ResolvedAbi(value.to_string()),
            diagnostics,
        };
    }

    if let Some((fpu_arg, fpu)) = mfpu {
        let abi = LoongArchAbi::new(width, fpu);
        debug!("ABI {abi} from {fpu_arg}");
        return AbiResolution {
            abi: abi.into(),
            diagnostics,
        };
    }

    let abi = LoongArchAbi::new(width, environment_default(triple.environment));
    debug!("ABI {abi} defaulted from triple {triple}");
    AbiResolution {
        abi: abi.into(),
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::Arch;
    use archcfg_core::Severity;

    fn la32(env: Environment) -> Triple {
        Triple::linux(Arch::LoongArch32, env)
    }

    fn la64(env: Environment) -> Triple {
        Triple::linux(Arch::LoongArch64, env)
    }

    fn resolve(triple: &Triple, args: &[&str]) -> AbiResolution {
        resolve_abi(triple, &OptionSet::parse(args).unwrap())
    }

    #[test]
    fn triple_defaults() {
        assert_eq!(resolve(&la64(Environment::Gnu), &[]).abi.as_str(), "lp64d");
        assert_eq!(resolve(&la32(Environment::GnuSf), &[]).abi.as_str(), "ilp32s");
        assert_eq!(resolve(&la64(Environment::GnuF32), &[]).abi.as_str(), "lp64f");
        assert_eq!(resolve(&la32(Environment::GnuF64), &[]).abi.as_str(), "ilp32d");
        assert_eq!(resolve(&la64(Environment::Unknown), &[]).abi.as_str(), "lp64d");
        assert_eq!(resolve(&la64(Environment::Musl), &[]).abi.as_str(), "lp64d");
        assert!(resolve(&la64(Environment::Gnu), &[]).diagnostics.is_empty());
    }

    #[test]
    fn float_option_beats_mabi() {
        let r = resolve(&la32(Environment::Gnu), &["-mdouble-float", "-mabi=ilp32s"]);
        assert_eq!(r.abi.as_str(), "ilp32d");
        assert_eq!(r.diagnostics.len(), 1);
        let d = r.diagnostics.iter().next().unwrap();
        assert_eq!(d.severity, Severity::Warning);
        assert_eq!(d.key, DiagKey::ConflictingImpliedValue);
        assert_eq!(d.args, vec!["-mabi=ilp32s", "-mdouble-float", "ilp32d"]);
    }

    #[test]
    fn float_option_beats_mfpu() {
        let r = resolve(&la64(Environment::Gnu), &["-mfpu=64", "-msoft-float"]);
        assert_eq!(r.abi.as_str(), "lp64s");
        let d = r.diagnostics.iter().next().unwrap();
        assert_eq!(d.args, vec!["-mfpu=64", "-msoft-float", "0"]);
    }

    #[test]
    fn one_warning_per_disagreeing_source() {
        let r = resolve(
            &la64(Environment::Gnu),
            &["-mabi=lp64d", "-mfpu=64", "-msingle-float"],
        );
        assert_eq!(r.abi.as_str(), "lp64f");
        assert_eq!(r.diagnostics.len(), 2);
        let args: Vec<&Vec<String>> = r.diagnostics.iter().map(|d| &d.args).collect();
        assert_eq!(args[0], &vec!["-mabi=lp64d", "-msingle-float", "lp64f"]);
        assert_eq!(args[1], &vec!["-mfpu=64", "-msingle-float", "32"]);
    }

    #[test]
    fn agreeing_sources_are_silent() {
        let r = resolve(
            &la64(Environment::Gnu),
            &["-mabi=lp64s", "-mfpu=none", "-msoft-float"],
        );
        assert_eq!(r.abi.as_str(), "lp64s");
        assert!(r.diagnostics.is_empty());
    }

    #[test]
    fn last_float_option_wins() {
        let r = resolve(&la64(Environment::Gnu), &["-msoft-float", "-mdouble-float"]);
        assert_eq!(r.abi.as_str(), "lp64d");
    }

    #[test]
    fn mabi_passes_through_unvalidated() {
        let r = resolve(&la64(Environment::GnuSf), &["-mabi=lp64f"]);
        assert_eq!(r.abi.as_str(), "lp64f");
        let r = resolve(&la64(Environment::Gnu), &["-mabi=bogus"]);
        assert_eq!(r.abi.as_str(), "bogus");
        assert!(r.abi.canonical().is_none());
        assert!(r.diagnostics.is_empty());
    }

    #[test]
    fn mabi_beats_mfpu() {
        let r = resolve(&la64(Environment::Gnu), &["-mfpu=0", "-mabi=lp64d"]);
        assert_eq!(r.abi.as_str(), "lp64d");
        assert!(r.diagnostics.is_empty());
    }

    #[test]
    fn empty_mabi_is_absent() {
        let r = resolve(&la32(Environment::GnuF32), &["-mabi="]);
        assert_eq!(r.abi.as_str(), "ilp32f");
    }

    #[test]
    fn mfpu_selects_suffix() {
        let t = la32(Environment::Gnu);
        assert_eq!(resolve(&t, &["-mfpu=64"]).abi.as_str(), "ilp32d");
        assert_eq!(resolve(&t, &["-mfpu=32"]).abi.as_str(), "ilp32f");
        assert_eq!(resolve(&t, &["-mfpu=0"]).abi.as_str(), "ilp32s");
        assert_eq!(resolve(&t, &["-mfpu=none"]).abi.as_str(), "ilp32s");
    }

    #[test]
    fn invalid_mfpu_falls_back_to_triple() {
        let r = resolve(&la64(Environment::GnuSf), &["-mfpu=16"]);
        assert_eq!(r.abi.as_str(), "lp64s");
        assert_eq!(r.diagnostics.len(), 1);
        let d = r.diagnostics.iter().next().unwrap();
        assert_eq!(d.key, DiagKey::InvalidFpuWidth);
        assert_eq!(d.severity, Severity::Error);
        assert_eq!(d.args, vec!["16"]);
    }

    #[test]
    fn invalid_mfpu_reported_even_when_float_option_wins() {
        let r = resolve(&la64(Environment::Gnu), &["-mfpu=128", "-msingle-float"]);
        assert_eq!(r.abi.as_str(), "lp64f");
        assert_eq!(r.diagnostics.len(), 1);
        assert_eq!(r.diagnostics.iter().next().unwrap().key, DiagKey::InvalidFpuWidth);
    }

    #[test]
    fn canonical_abi() {
        let r = resolve(&la64(Environment::Gnu), &[]);
        assert_eq!(r.abi.canonical(), Some(LoongArchAbi::Lp64d));
    }
}

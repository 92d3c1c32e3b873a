//! Per-family configuration rules.
//!
//! An [`ArchRule`] bundles the ABI and feature-set resolvers for one
//! architecture family. [`ArchRule::for_arch`] is the registry mapping a
//! triple's architecture to its rule.

use archcfg_core::{ClaimSet, Diagnostics, OptionSet};
use log::debug;

use crate::arch::Arch;
use crate::error::{Result, TargetError};
use crate::loongarch::{self, ResolvedAbi};
use crate::profile::{FeatureList, ProfileTable};
use crate::triple::Triple;

/// Configuration strategy for an architecture family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchRule {
    LoongArch,
}

/// Combined output of both resolvers for one compile job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetResolution {
    /// The triple that was resolved.
    pub triple: Triple,
    /// Selected ABI name.
    pub abi: ResolvedAbi,
    /// Backend feature toggles in append order.
    pub features: FeatureList,
    /// ABI diagnostics first, then feature diagnostics. A feature diagnostic
    /// identical to an ABI one (an invalid `-mfpu=` value) is reported once.
    pub diagnostics: Diagnostics,
    /// Option kinds consumed by the feature resolver.
    pub claimed: ClaimSet,
}

impl TargetResolution {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

impl ArchRule {
    /// Look up the rule for an architecture.
    pub fn for_arch(arch: Arch) -> Option<Self> {
        if arch.is_loongarch() {
            Some(ArchRule::LoongArch)
        } else {
            None
        }
    }

    /// The rule for a family name, case-insensitively.
    pub fn from_family(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("loongarch") {
            Some(ArchRule::LoongArch)
        } else {
            None
        }
    }

    pub fn family(self) -> &'static str {
        self.profiles().family()
    }

    /// Built-in architecture profiles of the family.
    pub fn profiles(self) -> &'static ProfileTable {
        match self {
            ArchRule::LoongArch => &loongarch::PROFILES,
        }
    }

    /// Run both resolvers with `profiles` as the profile table.
    ///
    /// Fails with [`TargetError::UnsupportedArch`] when the triple's
    /// architecture does not belong to this rule's family.
    pub fn resolve(
        self,
        profiles: &ProfileTable,
        triple: &Triple,
        options: &OptionSet,
    ) -> Result<TargetResolution> {
        if ArchRule::for_arch(triple.arch) != Some(self) {
            return Err(TargetError::UnsupportedArch(triple.arch));
        }
        match self {
            ArchRule::LoongArch => {
                let abi = loongarch::resolve_abi(triple, options);
                let features = loongarch::resolve_features(profiles, triple, options);

                let mut diagnostics = abi.diagnostics;
                for diag in features.diagnostics.iter() {
                    if !diagnostics.iter().any(|d| d == diag) {
                        diagnostics.push(diag.clone());
                    }
                }
                debug!(
                    "{triple}: abi={} features=[{}] ({} diagnostics)",
                    abi.abi,
                    features.features,
                    diagnostics.len()
                );
                Ok(TargetResolution {
                    triple: triple.clone(),
                    abi: abi.abi,
                    features: features.features,
                    diagnostics,
                    claimed: features.claimed,
                })
            }
        }
    }
}

/// Resolve a triple and options with the built-in rule and profile table.
pub fn resolve_target(triple: &Triple, options: &OptionSet) -> Result<TargetResolution> {
    let rule = ArchRule::for_arch(triple.arch).ok_or(TargetError::UnsupportedArch(triple.arch))?;
    rule.resolve(rule.profiles(), triple, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use archcfg_core::{DiagKey, OptionKind};

    #[test]
    fn registry() {
        assert_eq!(ArchRule::for_arch(Arch::LoongArch32), Some(ArchRule::LoongArch));
        assert_eq!(ArchRule::for_arch(Arch::LoongArch64), Some(ArchRule::LoongArch));
        assert_eq!(ArchRule::for_arch(Arch::X86_64), None);
        assert_eq!(ArchRule::from_family("LoongArch"), Some(ArchRule::LoongArch));
        assert_eq!(ArchRule::from_family("mips"), None);
        assert_eq!(ArchRule::LoongArch.family(), "LoongArch");
    }

    #[test]
    fn unsupported_arch() {
        let triple = Triple::linux(Arch::AArch64, Environment::Gnu);
        let err = resolve_target(&triple, &OptionSet::new()).unwrap_err();
        assert!(matches!(err, TargetError::UnsupportedArch(Arch::AArch64)));
    }

    #[test]
    fn diagnostics_are_abi_first() {
        let triple = Triple::linux(Arch::LoongArch64, Environment::Gnu);
        let options = OptionSet::parse(["-march=bogus", "-mabi=lp64s", "-mdouble-float"]).unwrap();
        let res = resolve_target(&triple, &options).unwrap();
        assert_eq!(res.abi.as_str(), "lp64d");
        assert!(res.features.is_empty());
        let keys: Vec<DiagKey> = res.diagnostics.iter().map(|d| d.key).collect();
        assert_eq!(
            keys,
            vec![DiagKey::ConflictingImpliedValue, DiagKey::InvalidArchName]
        );
        assert!(res.has_errors());
    }

    #[test]
    fn rule_rejects_foreign_triple() {
        let triple = Triple::linux(Arch::RiscV64, Environment::Gnu);
        let rule = ArchRule::LoongArch;
        let err = rule
            .resolve(rule.profiles(), &triple, &OptionSet::new())
            .unwrap_err();
        assert!(matches!(err, TargetError::UnsupportedArch(Arch::RiscV64)));
    }

    #[test]
    fn invalid_fpu_width_reported_once() {
        let triple = Triple::linux(Arch::LoongArch64, Environment::Gnu);
        let options = OptionSet::parse(["-mfpu=16"]).unwrap();
        let res = resolve_target(&triple, &options).unwrap();
        let fpu_errors = res
            .diagnostics
            .iter()
            .filter(|d| d.key == DiagKey::InvalidFpuWidth)
            .count();
        assert_eq!(fpu_errors, 1);
        assert_eq!(res.diagnostics.len(), 1);
        assert!(res.has_errors());
    }

    #[test]
    fn custom_profile_table() {
        use crate::profile::{ArchProfile, FeatureToggle};
        const FEATURES: &[FeatureToggle] = &[FeatureToggle::enable("lvz")];
        const PROFILES: &[ArchProfile] = &[ArchProfile::new("virt", "", FEATURES)];
        let table = ProfileTable::new("LoongArch", PROFILES);

        let triple = Triple::linux(Arch::LoongArch64, Environment::Gnu);
        let options = OptionSet::parse(["-march=virt"]).unwrap();
        let res = ArchRule::LoongArch.resolve(&table, &triple, &options).unwrap();
        assert_eq!(res.features.to_strings(), vec!["+lvz"]);
        assert!(res.claimed.contains(OptionKind::Arch));

        // The generic default is not in this table, so nothing is appended.
        let res = ArchRule::LoongArch
            .resolve(&table, &triple, &OptionSet::new())
            .unwrap();
        assert!(res.features.is_empty());
    }
}

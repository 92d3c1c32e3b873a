//! Feature-set resolution.
//!
//! Builds the ordered toggle list from, in append order: the architecture
//! profile, the floating-point override, and the alignment override.

use archcfg_core::{ClaimSet, DiagKey, Diagnostics, OptionKind, OptionSet};
use log::debug;

use super::abi::last_float_option;
use super::{FloatAbi, ALIGNMENT_OPTIONS, DEFAULT_LA64_ARCH, FEATURE_UAL, FLOAT_OPTIONS};
use crate::arch::WordWidth;
use crate::profile::{ArchProfile, FeatureList, FeatureToggle, ProfileTable};
use crate::triple::Triple;

/// `-march=` value reserved for host detection.
const NATIVE_ARCH: &str = "native";

/// Output of [`resolve_features`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureResolution {
    /// Toggles in append order; a later toggle overrides an earlier one.
    pub features: FeatureList,
    /// Architecture-name and `-mfpu=` errors.
    pub diagnostics: Diagnostics,
    /// Option kinds this resolver consumed or acknowledged.
    pub claimed: ClaimSet,
}

fn claim_present(claimed: &mut ClaimSet, options: &OptionSet, kinds: &[OptionKind]) {
    for &kind in kinds {
        if options.contains(kind) {
            claimed.claim(kind);
        }
    }
}

/// Compute the feature toggles for a LoongArch triple and option set.
///
/// An unknown `-march=` name stops resolution: the result holds one error
/// and no features, since no defaults can be derived from it.
pub fn resolve_features(
    profiles: &ProfileTable,
    triple: &Triple,
    options: &OptionSet,
) -> FeatureResolution {
    let mut res = FeatureResolution::default();

    let mut profile: Option<&ArchProfile> = None;
    if let Some(arch_arg) = options.last(OptionKind::Arch) {
        let name = arch_arg.value().unwrap_or_default();
        match profiles.lookup(name) {
            Some(p) => profile = Some(p),
            None if name == NATIVE_ARCH => {
                res.diagnostics
                    .emit(DiagKey::NativeArchUnsupported, [arch_arg.as_string()]);
                return res;
            }
            None => {
                res.diagnostics
                    .emit(DiagKey::InvalidArchName, [arch_arg.as_string()]);
                return res;
            }
        }
        res.claimed.claim(OptionKind::Arch);
    }

    if profile.is_none() && triple.word_width() == WordWidth::W64 {
        profile = profiles.lookup(DEFAULT_LA64_ARCH);
    }

    if let Some(p) = profile {
        debug!("appending {} defaults from profile '{}'", p.features.len(), p.name);
        res.features.extend_from_slice(p.features);
    }

    // `-m*-float` wins over `-mfpu=`.
    if let Some((float_arg, float)) = last_float_option(options) {
        debug!("float features from {float_arg}");
        res.features.extend_from_slice(&float.features());
        claim_present(&mut res.claimed, options, &FLOAT_OPTIONS);
    } else if let Some(fpu_arg) = options.last(OptionKind::Fpu) {
        let value = fpu_arg.value().unwrap_or_default();
        match FloatAbi::from_fpu_value(value) {
            Some(fpu) => {
                debug!("float features from {fpu_arg}");
                res.features.extend_from_slice(&fpu.features());
            }
            None => res.diagnostics.emit(DiagKey::InvalidFpuWidth, [value]),
        }
    }

    if let Some(align_arg) = options.last_of(&ALIGNMENT_OPTIONS) {
        let enabled = align_arg.kind() == OptionKind::UnalignedAccess;
        res.features.push(FeatureToggle::toggle(FEATURE_UAL, enabled));
        claim_present(&mut res.claimed, options, &ALIGNMENT_OPTIONS);
    }

    // `-mabi=` and `-mfpu=` are acknowledged whether or not they mattered here.
    claim_present(&mut res.claimed, options, &[OptionKind::Abi, OptionKind::Fpu]);

    res
}

//! Architecture profiles and feature toggles.
//!
//! An architecture profile names a CPU/architecture variant and lists the
//! feature toggles it turns on by default. Profiles for one family live in a
//! [`ProfileTable`], which is compiled in and never mutated.

use std::fmt;

use serde::{Serialize, Serializer};

/// A signed feature token, `+name` or `-name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureToggle {
    enabled: bool,
    name: &'static str,
}

impl FeatureToggle {
    pub const fn enable(name: &'static str) -> Self {
        Self {
            enabled: true,
            name,
        }
    }

    pub const fn disable(name: &'static str) -> Self {
        Self {
            enabled: false,
            name,
        }
    }

    /// Enable or disable `name` depending on `enabled`.
    pub const fn toggle(name: &'static str, enabled: bool) -> Self {
        Self { enabled, name }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for FeatureToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.enabled { '+' } else { '-' };
        write!(f, "{sign}{}", self.name)
    }
}

impl Serialize for FeatureToggle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered feature toggles handed to the code generator.
///
/// Duplicates are kept on purpose: a later entry for a name overrides an
/// earlier one when the list is consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FeatureList {
    toggles: Vec<FeatureToggle>,
}

impl FeatureList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toggle: FeatureToggle) {
        self.toggles.push(toggle);
    }

    pub fn extend_from_slice(&mut self, toggles: &[FeatureToggle]) {
        self.toggles.extend_from_slice(toggles);
    }

    /// The effective state of `name` after last-wins folding, or `None` if never toggled.
    pub fn is_enabled(&self, name: &str) -> Option<bool> {
        self.toggles
            .iter()
            .rev()
            .find(|t| t.name == name)
            .map(|t| t.enabled)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureToggle> {
        self.toggles.iter()
    }

    pub fn len(&self) -> usize {
        self.toggles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toggles.is_empty()
    }

    /// The tokens as strings, in order.
    pub fn to_strings(&self) -> Vec<String> {
        self.toggles.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for FeatureList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.toggles.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{t}")?;
        }
        Ok(())
    }
}

/// A named architecture variant and its default feature toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchProfile {
    /// Name accepted by `-march=`.
    pub name: &'static str,
    /// Short human-readable description.
    pub description: &'static str,
    /// Default toggles, in the order they are appended.
    pub features: &'static [FeatureToggle],
}

impl ArchProfile {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        features: &'static [FeatureToggle],
    ) -> Self {
        Self {
            name,
            description,
            features,
        }
    }
}

/// The architecture profiles of one family.
#[derive(Debug, Clone, Copy)]
pub struct ProfileTable {
    family: &'static str,
    profiles: &'static [ArchProfile],
}

impl ProfileTable {
    pub const fn new(family: &'static str, profiles: &'static [ArchProfile]) -> Self {
        Self { family, profiles }
    }

    /// Family name (e.g., "LoongArch").
    pub fn family(&self) -> &'static str {
        self.family
    }

    /// Look up a profile by its `-march=` name.
    pub fn lookup(&self, name: &str) -> Option<&'static ArchProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.profiles.iter().map(|p| p.name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static ArchProfile> {
        self.profiles.iter()
    }
}

//! Triple-string parsing and profile-table validation.
//!
//! The resolvers only ever see an already-parsed [`Triple`]. This module is
//! the front door for callers holding a triple string, and a structural check
//! for architecture profile tables.

use std::collections::HashSet;

use log::trace;

use crate::arch::Arch;
use crate::environment::Environment;
use crate::error::{Result, TargetError};
use crate::profile::ProfileTable;
use crate::triple::Triple;

/// A validation issue found in a profile table.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Parse `arch-vendor-os[-environment]`.
///
/// A three-component triple whose last word is a known environment
/// (`loongarch64-linux-gnu`) is read as `arch-os-environment` with vendor
/// `unknown`.
pub fn parse_triple(s: &str) -> Result<Triple> {
    let parts: Vec<&str> = s.splitn(4, '-').collect();
    if parts.len() < 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(TargetError::MalformedTriple { triple: s.into() });
    }
    let arch: Arch = parts[0].parse()?;

    let triple = match parts.as_slice() {
        [_, os, env] if Environment::from_name(env) != Environment::Unknown => {
            Triple::new(arch, "unknown", *os, Environment::from_name(env))
        }
        [_, vendor, os] => Triple::new(arch, *vendor, *os, Environment::Unknown),
        [_, vendor, os, env] => Triple::new(arch, *vendor, *os, Environment::from_name(env)),
        _ => return Err(TargetError::MalformedTriple { triple: s.into() }),
    };
    trace!("parsed triple '{s}' as {triple:?}");
    Ok(triple)
}

/// Validate a profile table for structural correctness.
///
/// Returns `Ok(())` if valid, or `Err(issues)` with a list of problems.
pub fn validate_profiles(table: &ProfileTable) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    // 1. Profile names are non-empty and unique
    let mut seen = HashSet::new();
    for profile in table.iter() {
        if profile.name.is_empty() {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!("{} table has a profile with an empty name", table.family()),
            });
        } else if !seen.insert(profile.name) {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!("duplicate profile name '{}'", profile.name),
            });
        }
    }

    for profile in table.iter() {
        // 2. Feature names are non-empty
        if profile.features.iter().any(|f| f.name().is_empty()) {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!("profile '{}' has a feature with an empty name", profile.name),
            });
        }

        // 3. A profile does not toggle the same feature twice
        let mut names = HashSet::new();
        for feature in profile.features {
            if !names.insert(feature.name()) {
                issues.push(ValidationIssue {
                    severity: "warning",
                    message: format!(
                        "profile '{}' toggles feature '{}' more than once",
                        profile.name,
                        feature.name()
                    ),
                });
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

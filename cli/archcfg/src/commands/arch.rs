//! `archcfg arch`: architecture profile listing and description.

use anyhow::{bail, Result};
use archcfg_targets::parse::validate_profiles;
use archcfg_targets::ArchRule;

/// The rule for `family`, defaulting to LoongArch.
fn rule_for(family: Option<&str>) -> Result<ArchRule> {
    match family {
        None => Ok(ArchRule::LoongArch),
        Some(name) => match ArchRule::from_family(name) {
            Some(rule) => Ok(rule),
            None => bail!("unknown architecture family: '{name}'"),
        },
    }
}

/// List the built-in profiles of a family.
pub fn list(family: Option<&str>) -> Result<()> {
    let rule = rule_for(family)?;
    println!("{} architecture profiles:", rule.family());
    println!();
    for profile in rule.profiles().iter() {
        println!("  {:<25} {}", profile.name, profile.description);
    }
    println!();
    println!("Use 'archcfg arch describe <name>' for details.");
    Ok(())
}

/// Describe one profile in detail.
pub fn describe(name: &str, family: Option<&str>) -> Result<()> {
    let rule = rule_for(family)?;
    let profile = match rule.profiles().lookup(name) {
        Some(p) => p,
        None => bail!("unknown architecture: '{name}'. Use 'archcfg arch list' to see available profiles."),
    };

    println!("=== {} profile: {} ===", rule.family(), profile.name);
    println!("{}", profile.description);
    println!();
    println!("Default features:");
    for feature in profile.features {
        println!("  {feature}");
    }
    Ok(())
}

/// Check the built-in profile table of a family for structural problems.
pub fn validate(family: Option<&str>) -> Result<()> {
    let rule = rule_for(family)?;
    match validate_profiles(rule.profiles()) {
        Ok(()) => {
            println!("{} profile table: OK", rule.family());
            Ok(())
        }
        Err(issues) => {
            let mut errors = 0;
            for issue in &issues {
                println!("  {}: {}", issue.severity, issue.message);
                if issue.severity == "error" {
                    errors += 1;
                }
            }
            if errors > 0 {
                bail!("{} profile table has {errors} error(s)", rule.family());
            }
            Ok(())
        }
    }
}

//! `archcfg triple`: show how a triple is read.

use anyhow::{Context, Result};
use archcfg_core::OptionSet;
use archcfg_targets::{parse_triple, ArchRule};

/// Print the parsed components of a triple and its option-free defaults.
pub fn describe(triple: &str) -> Result<()> {
    let parsed = parse_triple(triple).with_context(|| format!("parsing target '{triple}'"))?;

    println!("=== Triple: {parsed} ===");
    println!("  Arch:        {}", parsed.arch);
    println!("  Vendor:      {}", parsed.vendor);
    println!("  OS:          {}", parsed.os);
    println!("  Environment: {}", parsed.environment);
    println!("  Word width:  {} bits", parsed.word_width().bits());

    match ArchRule::for_arch(parsed.arch) {
        Some(rule) => {
            let res = rule.resolve(rule.profiles(), &parsed, &OptionSet::new())?;
            println!("  Family:      {}", rule.family());
            println!("  Default ABI: {}", res.abi);
            println!("  Features:    {}", res.features);
        }
        None => println!("  Family:      (no configuration rule)"),
    }
    Ok(())
}

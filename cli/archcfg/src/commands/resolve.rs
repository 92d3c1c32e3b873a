//! `archcfg resolve`: ABI and feature resolution for one compile job.

use anyhow::{bail, Context, Result};
use archcfg_core::{Arg, DiagKey, Diagnostics, OptionSet};
use archcfg_targets::report::{report_to_json, report_to_toml};
use archcfg_targets::{parse_triple, resolve_target, ResolutionReport, TargetResolution};

use crate::config::{ArchcfgConfig, OutputFormat, DEFAULT_TARGET};

/// Resolve the target and options, print the result, and fail if any
/// error-severity diagnostic was produced.
pub fn run(
    config: &ArchcfgConfig,
    target: Option<&str>,
    format: Option<OutputFormat>,
    warn_unused: bool,
    options: &[String],
) -> Result<()> {
    let resolution = resolve(config, target, options, warn_unused)?;
    let format = format
        .or(config.output_format())
        .unwrap_or(OutputFormat::Human);

    match format {
        OutputFormat::Human => {
            for diag in &resolution.diagnostics {
                eprintln!("archcfg: {diag}");
            }
            print!("{}", render_human(&resolution));
        }
        OutputFormat::Json => println!("{}", report_to_json(&ResolutionReport::new(&resolution))?),
        OutputFormat::Toml => print!("{}", report_to_toml(&ResolutionReport::new(&resolution))?),
    }

    let errors = resolution.diagnostics.iter().filter(|d| d.is_error()).count();
    if errors > 0 {
        bail!("{errors} error(s) generated");
    }
    Ok(())
}

/// Build the option set (config defaults first) and resolve it.
pub fn resolve(
    config: &ArchcfgConfig,
    target: Option<&str>,
    options: &[String],
    warn_unused: bool,
) -> Result<TargetResolution> {
    let target = target
        .or(config.default_target())
        .unwrap_or(DEFAULT_TARGET);
    let triple = parse_triple(target).with_context(|| format!("parsing target '{target}'"))?;

    let words = config.default_options().iter().chain(options);
    let options = OptionSet::parse(words).context("parsing target options")?;
    log::info!("resolving {triple} with {} option(s)", options.len());

    let mut resolution = resolve_target(&triple, &options)?;

    if warn_unused {
        let unused: Vec<String> = options
            .unclaimed(&resolution.claimed)
            .filter(|arg| !already_rejected(&resolution.diagnostics, arg))
            .map(Arg::as_string)
            .collect();
        for arg in unused {
            resolution.diagnostics.emit(DiagKey::UnusedArgument, [arg]);
        }
    }
    Ok(resolution)
}

/// Whether an error diagnostic already names `arg` or its value.
fn already_rejected(diagnostics: &Diagnostics, arg: &Arg) -> bool {
    let written = arg.as_string();
    diagnostics.iter().filter(|d| d.is_error()).any(|d| {
        d.args
            .iter()
            .any(|a| *a == written || Some(a.as_str()) == arg.value())
    })
}

/// Plain-text rendering of a resolution.
pub fn render_human(resolution: &TargetResolution) -> String {
    format!(
        "target:   {}\nabi:      {}\nfeatures: {}\n",
        resolution.triple, resolution.abi, resolution.features
    )
}

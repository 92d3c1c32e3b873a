//! Serializable resolution reports.

use archcfg_core::{DiagKey, Severity};
use serde::Serialize;

use crate::error::Result;
use crate::rule::TargetResolution;

/// One rendered diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    pub severity: Severity,
    pub key: DiagKey,
    pub message: String,
    pub args: Vec<String>,
}

/// Flat view of a [`TargetResolution`] for JSON/TOML output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    pub target: String,
    pub abi: String,
    pub features: Vec<String>,
    pub diagnostics: Vec<DiagnosticReport>,
}

impl ResolutionReport {
    pub fn new(resolution: &TargetResolution) -> Self {
        Self {
            target: resolution.triple.to_string(),
            abi: resolution.abi.to_string(),
            features: resolution.features.to_strings(),
            diagnostics: resolution
                .diagnostics
                .iter()
                .map(|d| DiagnosticReport {
                    severity: d.severity,
                    key: d.key,
                    message: d.render(),
                    args: d.args.clone(),
                })
                .collect(),
        }
    }
}

/// Serialize a report to pretty JSON.
pub fn report_to_json(report: &ResolutionReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Serialize a report to pretty TOML.
pub fn report_to_toml(report: &ResolutionReport) -> Result<String> {
    Ok(toml::to_string_pretty(report)?)
}

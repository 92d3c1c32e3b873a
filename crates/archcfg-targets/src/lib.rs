//! Target configuration resolution for a compiler driver.
//!
//! Given an already-parsed target triple and the target-specific command-line
//! options of one compile job, computes:
//! - **ABI:** the canonical calling-convention name (e.g., `lp64d`)
//! - **Features:** the ordered `+name`/`-name` toggles handed to code generation
//!
//! Both are pure functions of (triple, options) plus a compiled-in profile
//! table. Contradictory options yield diagnostics, never failures.
//!
//! ## Modules
//!
//! - [`arch`]: Architectures and word-width classes
//! - [`environment`]: Triple environment tags
//! - [`triple`]: The parsed triple
//! - [`parse`]: Triple-string parsing and profile-table validation
//! - [`profile`]: Feature toggles, feature lists, architecture profiles
//! - [`loongarch`]: LoongArch ABI and feature-set resolvers
//! - [`rule`]: Per-family rule registry
//! - [`report`]: JSON/TOML resolution reports

pub mod arch;
pub mod environment;
pub mod error;
pub mod loongarch;
pub mod parse;
pub mod profile;
pub mod report;
pub mod rule;
pub mod triple;

pub use arch::{Arch, WordWidth};
pub use environment::Environment;
pub use error::TargetError;
pub use parse::parse_triple;
pub use profile::{ArchProfile, FeatureList, FeatureToggle, ProfileTable};
pub use report::ResolutionReport;
pub use rule::{resolve_target, ArchRule, TargetResolution};
pub use triple::Triple;

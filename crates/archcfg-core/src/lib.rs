//! Option model and diagnostics shared by the architecture configuration resolvers.
//!
//! ## Modules
//!
//! - [`option`]: Option kinds, parsed arguments, last-wins lookup, claims
//! - [`diagnostic`]: Diagnostic records and the per-invocation sink
//! - [`error`]: Errors raised while building an option set

pub mod diagnostic;
pub mod error;
pub mod option;

pub use diagnostic::{DiagKey, Diagnostic, Diagnostics, Severity};
pub use error::OptionError;
pub use option::{Arg, ClaimSet, OptionKind, OptionSet};

//! CLI command implementations.

pub mod arch;
pub mod resolve;
pub mod triple;

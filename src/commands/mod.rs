//! CLI command implementations.
//!
//! Each submodule is a thin I/O shell around the pure library: it reads
//! and validates input files, calls into the engine or catalog, and
//! renders the result in the requested format.

pub mod catalog;
pub mod compare;

pub use catalog::handle_catalog;
pub use compare::handle_compare;

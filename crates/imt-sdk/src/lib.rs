//! Workflow logic behind the `imt` CLI: state files, proof files and command implementations.

/// Command implementations, one per CLI subcommand.
pub mod commands;
/// CLI-independent configuration types.
pub mod common;
/// JSON persistence of tree state and proof documents.
pub mod store;

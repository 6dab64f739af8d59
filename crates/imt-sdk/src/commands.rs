//! Application command implementations.
//!
//! This module contains the core logic for each CLI subcommand.

mod inspect;
mod tree_init;
mod tree_insert;
mod tree_prove;
mod tree_verify;

pub use inspect::{inspect_leaves, inspect_nodes, inspect_root};
pub use tree_init::init_tree;
pub use tree_insert::insert_values;
pub use tree_prove::prove_non_membership;
pub use tree_verify::verify_proof_file;

/// Generates and prints the JSON schema for the persisted tree state.
///
/// # Errors
/// Returns an error if serialization to JSON fails.
#[allow(clippy::print_stdout, reason = "Prints schema to stdout")]
pub fn tree_state_schema() -> eyre::Result<()> {
    let schema = schemars::schema_for!(imt_core::schema::state::TreeState);
    let schema_str = serde_json::to_string_pretty(&schema)?;
    println!("{schema_str}");
    Ok(())
}

/// Generates and prints the JSON schema for the non-membership proof document.
///
/// # Errors
/// Returns an error if serialization to JSON fails.
#[allow(clippy::print_stdout, reason = "Prints schema to stdout")]
pub fn proof_schema() -> eyre::Result<()> {
    let schema = schemars::schema_for!(imt_core::schema::proof::NonMembershipProof);
    let schema_str = serde_json::to_string_pretty(&schema)?;
    println!("{schema_str}");
    Ok(())
}

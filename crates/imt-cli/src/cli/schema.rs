//! Schema subcommands.

/// Documents with a published JSON schema.
#[derive(Debug, clap::Subcommand)]
pub enum SchemaCommands {
    /// Persisted tree state.
    State,
    /// Non-membership proof.
    Proof,
}

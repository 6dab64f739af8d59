//! Command-line interface for the `imt` CLI application.

pub mod constants;
mod schema;

use std::path::PathBuf;

use clap::Parser;
use eyre::{Result, eyre};
use imt_core::base::{FieldElement, HashKind};
use imt_sdk::common::TreeConfig;

use self::constants::{
    DEFAULT_HASH, DEFAULT_PROOF_FILE, DEFAULT_STATE_FILE, IMT_HASH, IMT_PROOF, IMT_PROOF_OUT,
    IMT_STATE,
};
pub use self::schema::SchemaCommands;

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = "imt")]
#[command(about = "Indexed Merkle tree tools: build a tree, prove and verify non-membership")]
pub struct Cli {
    /// Hash function of the tree (sha256 or blake2s).
    #[arg(
        long,
        global = true,
        env = IMT_HASH,
        default_value = DEFAULT_HASH,
        value_parser = parse_hash_kind
    )]
    pub hash: HashKind,
    /// CLI top-level command.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Create a new tree holding only the sentinel leaf.
    Init {
        /// State file arguments.
        #[command(flatten)]
        state: StateArgs,
        /// Overwrite an existing state file.
        #[arg(long)]
        force: bool,
    },
    /// Insert decimal values into the tree, in order.
    Insert {
        /// State file arguments.
        #[command(flatten)]
        state: StateArgs,
        /// Values to insert.
        #[arg(required = true, value_parser = parse_field_element)]
        values: Vec<FieldElement>,
    },
    /// Write a non-membership proof for a value.
    Prove {
        /// State file arguments.
        #[command(flatten)]
        state: StateArgs,
        /// Value to prove absent.
        #[arg(long, value_parser = parse_field_element)]
        value: FieldElement,
        /// Output file for the proof.
        #[arg(long, env = IMT_PROOF_OUT, default_value = DEFAULT_PROOF_FILE)]
        proof_out: PathBuf,
    },
    /// Verify a non-membership proof file. Exits with status 1 when the proof is invalid.
    Verify {
        /// Proof file to verify.
        #[arg(long, env = IMT_PROOF, default_value = DEFAULT_PROOF_FILE)]
        proof: PathBuf,
        /// Also require the proof to match this tree's current root.
        #[arg(long)]
        state: Option<PathBuf>,
    },
    /// Show the tree size and root.
    Root {
        /// State file arguments.
        #[command(flatten)]
        state: StateArgs,
    },
    /// Show the leaves in append order and the sorted values.
    Leaves {
        /// State file arguments.
        #[command(flatten)]
        state: StateArgs,
    },
    /// Show the stored node hashes at one level (0 = leaves, 32 = root).
    Nodes {
        /// State file arguments.
        #[command(flatten)]
        state: StateArgs,
        /// Tree level.
        #[arg(long, allow_negative_numbers = true)]
        level: i64,
    },
    /// Print the JSON schema of a document.
    Schema {
        /// Schema subcommands.
        #[command(subcommand)]
        command: SchemaCommands,
    },
}

/// Location of the tree state file.
#[derive(Debug, clap::Args)]
pub struct StateArgs {
    /// Tree state file.
    #[arg(long, env = IMT_STATE, default_value = DEFAULT_STATE_FILE)]
    pub state: PathBuf,
}

impl StateArgs {
    /// Combine with the global hash selection.
    pub fn into_config(self, hash: HashKind) -> TreeConfig {
        TreeConfig {
            state_file: self.state,
            hash,
        }
    }
}

pub fn parse_hash_kind(s: &str) -> Result<HashKind> {
    s.parse::<HashKind>().map_err(|e| eyre!(e))
}

pub fn parse_field_element(s: &str) -> Result<FieldElement> {
    s.parse::<FieldElement>()
        .map_err(|e| eyre!("Invalid value '{s}': {e}. Expected a non-negative decimal integer."))
}

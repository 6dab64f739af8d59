use std::path::PathBuf;

use eyre::Context as _;
use imt_core::base::HashKind;
use imt_tree::verify_non_membership_proof;
use tracing::{info, instrument, warn};

use crate::store::{load_proof, load_tree};

/// Verify a proof file.
///
/// Without `state_file` only the proof's own consistency is checked. With it, the proof must
/// also have been made against the tree's current root.
///
/// Returns whether the proof is accepted.
///
/// # Errors
/// Returns an error only if a file cannot be loaded; an unsound proof is `Ok(false)`.
#[instrument(skip_all, fields(proof = %proof_file.display()))]
pub async fn verify_proof_file(
    proof_file: PathBuf,
    hash: HashKind,
    state_file: Option<PathBuf>,
) -> eyre::Result<bool> {
    let proof = load_proof(&proof_file)
        .await
        .context("Failed to load proof")?;

    let valid = match state_file {
        Some(state_file) => {
            let tree = load_tree(&state_file, hash)
                .await
                .context("Failed to load tree state")?;
            if proof.root != *tree.root() {
                warn!(
                    proof_root = %proof.root,
                    tree_root = %tree.root(),
                    "Proof root is not the current tree root"
                );
            }
            tree.is_proof_current(&proof)
        }
        None => verify_non_membership_proof(&hash, &proof),
    };

    if valid {
        info!(query = %proof.query, root = %proof.root, "Proof is valid");
    } else {
        warn!(query = %proof.query, "Proof is INVALID");
    }
    Ok(valid)
}

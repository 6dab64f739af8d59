use std::path::PathBuf;

use eyre::Context as _;
use imt_core::base::FieldElement;
use tracing::{info, instrument, warn};

use crate::common::TreeConfig;
use crate::store::{load_tree, save_proof};

/// Build a non-membership proof for `value` against the stored tree and write it to
/// `proof_out`.
///
/// # Errors
/// Returns an error if the tree cannot be loaded, no predecessor exists for `value`, or the
/// proof cannot be written.
#[instrument(skip_all, fields(state = %config.state_file.display(), value = %value))]
pub async fn prove_non_membership(
    config: TreeConfig,
    value: FieldElement,
    proof_out: PathBuf,
) -> eyre::Result<()> {
    let tree = load_tree(&config.state_file, config.hash)
        .await
        .context("Failed to load tree state")?;

    if tree.contains(&value) {
        warn!("Value is in the tree, the proof will not verify");
    }
    let proof = tree
        .create_non_membership_proof(&value)
        .with_context(|| format!("Failed to build a non-membership proof for {value}"))?;

    save_proof(&proof_out, &proof)
        .await
        .context("Failed to write proof")?;

    info!(
        file = ?proof_out,
        predecessor = %proof.pre_leaf.val,
        root = %proof.root,
        "Non-membership proof written"
    );
    Ok(())
}

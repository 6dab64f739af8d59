use eyre::{Context as _, ensure};
use imt_tree::IndexedMerkleTree;
use tracing::{info, instrument};

use crate::common::TreeConfig;
use crate::store::{file_exists, save_tree};

/// Create a tree holding only the sentinel leaf and write it to the configured state file.
///
/// # Errors
/// Returns an error if the state file already exists and `force` is not set, or if it cannot
/// be written.
#[instrument(skip_all, fields(state = %config.state_file.display(), hash = %config.hash))]
pub async fn init_tree(config: TreeConfig, force: bool) -> eyre::Result<()> {
    ensure!(
        force || !file_exists(&config.state_file).await?,
        "State file {} already exists, pass --force to overwrite it",
        config.state_file.display()
    );

    let tree = IndexedMerkleTree::new(config.hash);
    save_tree(&config.state_file, &tree)
        .await
        .context("Failed to write tree state")?;

    info!(file = ?config.state_file, root = %tree.root(), "Initialized empty tree");
    Ok(())
}

use eyre::Context as _;
use imt_core::base::FieldElement;
use tracing::{debug, info, instrument};

use crate::common::TreeConfig;
use crate::store::{load_tree, save_tree};

/// Insert `values` in order and save the tree.
///
/// All-or-nothing: the state file is only rewritten when every value was inserted.
///
/// # Errors
/// Returns an error if the tree cannot be loaded or saved, or on the first value that cannot
/// be inserted (duplicate or reserved).
#[instrument(skip_all, fields(state = %config.state_file.display(), count = values.len()))]
pub async fn insert_values(config: TreeConfig, values: Vec<FieldElement>) -> eyre::Result<()> {
    let mut tree = load_tree(&config.state_file, config.hash)
        .await
        .context("Failed to load tree state")?;

    for value in values {
        tree.insert(value.clone())
            .with_context(|| format!("Failed to insert {value}"))?;
        debug!(%value, "Inserted value");
    }

    save_tree(&config.state_file, &tree)
        .await
        .context("Failed to write tree state")?;

    info!(size = tree.size(), root = %tree.root(), "Tree updated");
    Ok(())
}

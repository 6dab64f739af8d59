//! Read-only views of a stored tree.

use eyre::Context as _;
use imt_core::base::FieldElement;
use imt_core::schema::state::Leaf;
use tracing::{info, instrument};

use crate::common::TreeConfig;
use crate::store::load_tree;

/// Log and return the tree's size and root.
///
/// # Errors
/// Returns an error if the tree cannot be loaded.
#[instrument(skip_all, fields(state = %config.state_file.display()))]
pub async fn inspect_root(config: TreeConfig) -> eyre::Result<(usize, FieldElement)> {
    let tree = load_tree(&config.state_file, config.hash)
        .await
        .context("Failed to load tree state")?;
    info!(size = tree.size(), root = %tree.root(), "Tree root");
    Ok((tree.size(), tree.root().clone()))
}

/// Log every leaf in append order and the sorted values; return the leaves.
///
/// # Errors
/// Returns an error if the tree cannot be loaded.
#[instrument(skip_all, fields(state = %config.state_file.display()))]
pub async fn inspect_leaves(config: TreeConfig) -> eyre::Result<Vec<Leaf>> {
    let tree = load_tree(&config.state_file, config.hash)
        .await
        .context("Failed to load tree state")?;

    let leaves = tree.leaves();
    for (index, leaf) in leaves.iter().enumerate() {
        info!(
            index,
            val = %leaf.val,
            next_val = %leaf.next_val,
            next_idx = leaf.next_idx,
            "Leaf"
        );
    }
    let sorted = tree
        .sorted_values()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    info!(count = leaves.len(), sorted = %format!("[{sorted}]"), "Sorted values");
    Ok(leaves)
}

/// Log and return the stored node row at `level`.
///
/// # Errors
/// Returns an error if the tree cannot be loaded or `level` is not a tree level.
#[instrument(skip_all, fields(state = %config.state_file.display(), level = level))]
pub async fn inspect_nodes(config: TreeConfig, level: i64) -> eyre::Result<Vec<FieldElement>> {
    let tree = load_tree(&config.state_file, config.hash)
        .await
        .context("Failed to load tree state")?;
    let nodes = tree.nodes_at_level(level)?;
    for (index, node) in nodes.iter().enumerate() {
        info!(index, hash = %node, "Node");
    }
    info!(count = nodes.len(), "Stored nodes at level");
    Ok(nodes)
}

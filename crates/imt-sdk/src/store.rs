//! Load and save tree state and proof documents as JSON files.
//!
//! Loading a tree trusts the stored hashes; see [`IndexedMerkleTree::from_state`].

use std::path::{Path, PathBuf};

use imt_core::base::Hash2;
use imt_core::schema::proof::NonMembershipProof;
use imt_core::schema::state::TreeState;
use imt_tree::{IndexedMerkleTree, TreeError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Errors reading or writing tree and proof files.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The file to load does not exist.
    #[error("File {} does not exist", .0.display())]
    NotFound(PathBuf),

    /// Filesystem failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid document of the expected kind.
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        /// File being parsed or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The state document parsed but cannot be turned into a tree.
    #[error("Invalid tree state: {0}")]
    Tree(#[from] TreeError),
}

impl StoreError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path) -> impl FnOnce(serde_json::Error) -> Self + '_ {
        move |source| Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Whether `path` exists.
///
/// # Errors
/// Returns [`StoreError::Io`] if existence cannot be determined.
pub async fn file_exists(path: &Path) -> Result<bool, StoreError> {
    tokio::fs::try_exists(path)
        .await
        .map_err(StoreError::io(path))
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    if !file_exists(path).await? {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let bytes = tokio::fs::read(path).await.map_err(StoreError::io(path))?;
    debug!(file = ?path, bytes = bytes.len(), "Read document");
    serde_json::from_slice(&bytes).map_err(StoreError::json(path))
}

async fn write_json<T: Serialize>(path: &Path, document: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(StoreError::io(parent))?;
    }
    let json = serde_json::to_vec_pretty(document).map_err(StoreError::json(path))?;
    tokio::fs::write(path, &json)
        .await
        .map_err(StoreError::io(path))?;
    debug!(file = ?path, bytes = json.len(), "Wrote document");
    Ok(())
}

/// Write the full tree state to `path`, creating parent directories as needed.
///
/// # Errors
/// Returns [`StoreError::Io`] or [`StoreError::Json`] if the file cannot be written.
pub async fn save_tree<H: Hash2>(
    path: &Path,
    tree: &IndexedMerkleTree<H>,
) -> Result<(), StoreError> {
    write_json(path, &tree.to_state()).await
}

/// Load a tree previously written by [`save_tree`].
///
/// `hasher` must be the one the tree was built with; it is not recorded in the file.
///
/// # Errors
/// - [`StoreError::NotFound`] if `path` does not exist.
/// - [`StoreError::Io`] / [`StoreError::Json`] if it cannot be read or parsed.
/// - [`StoreError::Tree`] if the document does not describe a usable tree.
pub async fn load_tree<H: Hash2>(
    path: &Path,
    hasher: H,
) -> Result<IndexedMerkleTree<H>, StoreError> {
    let state: TreeState = read_json(path).await?;
    Ok(IndexedMerkleTree::from_state(state, hasher)?)
}

/// Write a proof document to `path`, creating parent directories as needed.
///
/// # Errors
/// Returns [`StoreError::Io`] or [`StoreError::Json`] if the file cannot be written.
pub async fn save_proof(path: &Path, proof: &NonMembershipProof) -> Result<(), StoreError> {
    write_json(path, proof).await
}

/// Load a proof document.
///
/// # Errors
/// - [`StoreError::NotFound`] if `path` does not exist.
/// - [`StoreError::Io`] / [`StoreError::Json`] if it cannot be read or parsed.
pub async fn load_proof(path: &Path) -> Result<NonMembershipProof, StoreError> {
    read_json(path).await
}

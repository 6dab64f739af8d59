//! CLI-independent configuration types.

use std::path::PathBuf;

use imt_core::base::HashKind;

/// Where a tree lives and how it hashes.
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Path of the JSON state document.
    pub state_file: PathBuf,
    /// Hash function the tree was (or will be) built with.
    pub hash: HashKind,
}

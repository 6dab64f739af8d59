//! Shared constants for CLI.

// -------------------------
// Environment variables
// -------------------------

pub const IMT_STATE: &str = "IMT_STATE";
pub const IMT_HASH: &str = "IMT_HASH";
pub const IMT_PROOF: &str = "IMT_PROOF";
pub const IMT_PROOF_OUT: &str = "IMT_PROOF_OUT";

// -------------------------
// Defaults
// -------------------------

pub const DEFAULT_STATE_FILE: &str = "imt_state.json";
pub const DEFAULT_PROOF_FILE: &str = "imt_proof.json";
pub const DEFAULT_HASH: &str = "sha256";

//! Serialized schema/data contracts.

/// Non-membership proof document types.
pub mod proof;
/// Persisted tree state document types.
pub mod state;

//! Indexed Merkle tree base primitives and schemas.

/// Foundational primitive types and the two-input hash interface.
pub mod base;
/// Serialized/public schema models used across the workspace.
pub mod schema;

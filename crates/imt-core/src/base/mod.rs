//! Foundational primitive types and the hash interface.

mod field;
mod hash;

pub use field::{FieldElement, FieldElementParseError, LeafIndex};
pub use hash::{Blake2sHash2, Hash2, HashKind, Sha256Hash2};

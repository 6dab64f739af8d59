//! Two-input hash interface and the concrete hashers.
//!
//! Every hasher frames each input as `BE64(len) || bytes_be(x)` before digesting, so
//! `hash2(a, b)` never collides with `hash2(a', b')` through re-splitting the concatenation.
//! Digests are read back as big-endian unsigned integers.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use super::FieldElement;

/// Personalization for [`Blake2sHash2`]. Exactly `blake2s_simd::PERSONALBYTES` long.
const BLAKE2S_PERSONALIZATION: &[u8; 8] = b"IMT_hash";

/// A deterministic, pure two-input hash over field elements.
///
/// Both the tree and the proof verifier are parameterized by an implementation; they must
/// use the same one for proofs to verify.
pub trait Hash2 {
    /// Hash the ordered pair `(left, right)`.
    fn hash2(&self, left: &FieldElement, right: &FieldElement) -> FieldElement;
}

impl<H: Hash2 + ?Sized> Hash2 for &H {
    fn hash2(&self, left: &FieldElement, right: &FieldElement) -> FieldElement {
        (**self).hash2(left, right)
    }
}

fn length_prefix(bytes: &[u8]) -> [u8; 8] {
    u64::try_from(bytes.len()).unwrap_or(u64::MAX).to_be_bytes()
}

/// SHA-256 over the framed inputs. The default hasher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hash2;

impl Hash2 for Sha256Hash2 {
    fn hash2(&self, left: &FieldElement, right: &FieldElement) -> FieldElement {
        let mut hasher = Sha256::new();
        for input in [left, right] {
            let bytes = input.to_bytes_be();
            hasher.update(length_prefix(&bytes));
            hasher.update(&bytes);
        }
        FieldElement::from_bytes_be(&hasher.finalize())
    }
}

/// Personalized `BLAKE2s-256` over the framed inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake2sHash2;

impl Hash2 for Blake2sHash2 {
    fn hash2(&self, left: &FieldElement, right: &FieldElement) -> FieldElement {
        let mut state = blake2s_simd::Params::new()
            .hash_length(32)
            .personal(BLAKE2S_PERSONALIZATION)
            .to_state();
        for input in [left, right] {
            let bytes = input.to_bytes_be();
            state.update(&length_prefix(&bytes));
            state.update(&bytes);
        }
        FieldElement::from_bytes_be(state.finalize().as_bytes())
    }
}

/// Runtime selection of a built-in hasher.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum HashKind {
    /// [`Sha256Hash2`].
    #[default]
    Sha256,
    /// [`Blake2sHash2`].
    Blake2s,
}

impl Hash2 for HashKind {
    fn hash2(&self, left: &FieldElement, right: &FieldElement) -> FieldElement {
        match self {
            Self::Sha256 => Sha256Hash2.hash2(left, right),
            Self::Blake2s => Blake2sHash2.hash2(left, right),
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => f.write_str("sha256"),
            Self::Blake2s => f.write_str("blake2s"),
        }
    }
}

impl FromStr for HashKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "blake2s" => Ok(Self::Blake2s),
            other => Err(format!(
                "Unknown hash '{other}', expected 'sha256' or 'blake2s'"
            )),
        }
    }
}

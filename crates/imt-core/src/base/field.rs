//! Arbitrary-precision field elements.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero as _;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

/// Append-assigned position of a leaf in the tree.
pub type LeafIndex = u64;

/// An arbitrary-precision non-negative integer.
///
/// Committed values and hash outputs share this type. Arithmetic on the inner
/// [`BigUint`] is exact, equality is value equality, and the text/serde form is
/// the plain decimal string (`"0"`, `"12345"`, ...).
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct FieldElement(BigUint);

impl FieldElement {
    /// The zero element. Also the sentinel value of the tree.
    #[must_use]
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Returns `true` for the zero element.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Interpret big-endian bytes as an unsigned integer.
    #[must_use]
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Self(BigUint::from_bytes_be(bytes))
    }

    /// Minimal big-endian encoding. Zero encodes as a single `0x00` byte.
    #[must_use]
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }

    /// Borrow the underlying integer.
    #[must_use]
    pub const fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<BigUint> for FieldElement {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<FieldElement> for BigUint {
    fn from(value: FieldElement) -> Self {
        value.0
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Errors parsing the decimal form of a [`FieldElement`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldElementParseError {
    /// The input string was empty.
    #[error("Field element string is empty")]
    Empty,

    /// The input contained something other than ASCII decimal digits.
    #[error("Invalid decimal digit {found:?} at offset {offset}")]
    InvalidDigit {
        /// Byte offset of the offending character.
        offset: usize,
        /// The offending character.
        found: char,
    },
}

impl FromStr for FieldElement {
    type Err = FieldElementParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(FieldElementParseError::Empty);
        }
        // `BigUint` would also accept `+` and `_`; the persisted format does not.
        if let Some((offset, found)) = s.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(FieldElementParseError::InvalidDigit { offset, found });
        }
        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Self)
            .ok_or(FieldElementParseError::Empty)
    }
}

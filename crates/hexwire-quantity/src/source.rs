use num_bigint::BigInt;

use crate::codec;
use crate::error::QuantityError;
use crate::quantity::Quantity;

/// Source shapes accepted when constructing a [`Quantity`].
///
/// Normalization is total over these variants: every case either produces
/// the canonical byte form or fails with
/// [`QuantityError::InvalidInput`]. Signed variants exist so that negative
/// inputs are representable and rejected with a proper error instead of
/// being unconstructible.
#[derive(Debug, Clone)]
pub enum QuantitySource {
    /// Big-endian unsigned byte sequence; leading zero bytes are stripped.
    Bytes(Vec<u8>),
    /// Native machine-word integer.
    U64(u64),
    /// Signed native integer; negative values are rejected.
    I64(i64),
    /// Arbitrary-precision integer; negative values are rejected.
    Big(BigInt),
    /// Hexadecimal literal with the mandatory `0x` prefix.
    Hex(String),
    /// No value supplied.
    Absent,
    /// An existing quantity.
    Quantity(Quantity),
}

const UNSIGNED_ONLY: &str = "quantities are unsigned; negative integers are not allowed";

impl QuantitySource {
    /// Normalizes the source into canonical big-endian bytes.
    ///
    /// Returns `None` for an absent source. An existing quantity
    /// contributes its canonical byte view, so an absent instance
    /// normalizes to the empty (present) sequence here; the identity path
    /// in [`Quantity::wrap`] is handled before normalization.
    pub(crate) fn into_canonical_bytes(self) -> Result<Option<Vec<u8>>, QuantityError> {
        match self {
            QuantitySource::Bytes(bytes) => Ok(Some(codec::strip_leading_zeros(bytes))),
            QuantitySource::U64(value) => Ok(Some(u64_to_canonical_bytes(value))),
            QuantitySource::I64(value) => {
                if value < 0 {
                    return Err(QuantityError::InvalidInput {
                        value: value.to_string(),
                        expected: UNSIGNED_ONLY,
                    });
                }
                Ok(Some(u64_to_canonical_bytes(value as u64)))
            }
            QuantitySource::Big(value) => match value.to_biguint() {
                Some(magnitude) => Ok(Some(codec::strip_leading_zeros(magnitude.to_bytes_be()))),
                None => Err(QuantityError::InvalidInput {
                    value: value.to_string(),
                    expected: UNSIGNED_ONLY,
                }),
            },
            QuantitySource::Hex(text) => codec::decode(&text).map(Some),
            QuantitySource::Absent => Ok(None),
            QuantitySource::Quantity(quantity) => Ok(Some(quantity.to_bytes().to_vec())),
        }
    }
}

fn u64_to_canonical_bytes(value: u64) -> Vec<u8> {
    codec::strip_leading_zeros(value.to_be_bytes().to_vec())
}

impl From<u64> for QuantitySource {
    fn from(value: u64) -> Self {
        Self::U64(value)
    }
}

impl From<u32> for QuantitySource {
    fn from(value: u32) -> Self {
        Self::U64(u64::from(value))
    }
}

impl From<i64> for QuantitySource {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<i32> for QuantitySource {
    fn from(value: i32) -> Self {
        Self::I64(i64::from(value))
    }
}

impl From<Vec<u8>> for QuantitySource {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for QuantitySource {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<String> for QuantitySource {
    fn from(value: String) -> Self {
        Self::Hex(value)
    }
}

impl From<&str> for QuantitySource {
    fn from(value: &str) -> Self {
        Self::Hex(value.to_owned())
    }
}

impl From<BigInt> for QuantitySource {
    fn from(value: BigInt) -> Self {
        Self::Big(value)
    }
}

impl From<Quantity> for QuantitySource {
    fn from(value: Quantity) -> Self {
        Self::Quantity(value)
    }
}

impl From<&Quantity> for QuantitySource {
    fn from(value: &Quantity) -> Self {
        Self::Quantity(value.clone())
    }
}

impl<T: Into<QuantitySource>> From<Option<T>> for QuantitySource {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Self::Absent,
        }
    }
}

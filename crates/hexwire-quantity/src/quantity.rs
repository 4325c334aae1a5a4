use std::hash::{Hash, Hasher};
use std::str::FromStr;

use num_bigint::BigUint;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec;
use crate::error::QuantityError;
use crate::source::QuantitySource;

/// Canonical unsigned integer exchanged over the JSON-RPC wire.
///
/// Internally the value is the minimal big-endian byte encoding of the
/// integer: no leading zero byte, and zero is the empty sequence. An
/// absent source (`None`-like input) is recorded distinctly from the
/// integer zero; the `nullable` flag fixed at construction decides whether
/// that absence renders as an absent marker or coalesces to zero.
///
/// Instances are immutable. [`Quantity::add`] allocates a new instance and
/// never touches the receiver, so quantities can be shared freely across
/// threads without synchronization.
#[derive(Debug, Clone)]
pub struct Quantity {
    /// Minimal big-endian bytes; `None` records an absent source.
    value: Option<Vec<u8>>,
    /// Whether an absent value renders as the absent marker.
    nullable: bool,
}

impl Quantity {
    /// Constructs a fresh quantity from any accepted source shape.
    ///
    /// Unlike [`Quantity::wrap`], an existing instance passed here is not
    /// returned as-is: its canonical byte view is re-derived (so its
    /// absent state is not carried through) and the supplied `nullable`
    /// flag applies.
    ///
    /// # Errors
    ///
    /// Fails with [`QuantityError::InvalidInput`] for malformed hex
    /// literals and negative integers.
    pub fn new(source: impl Into<QuantitySource>, nullable: bool) -> Result<Self, QuantityError> {
        let value = source.into().into_canonical_bytes()?;
        Ok(Self { value, nullable })
    }

    /// Wraps a source, returning an existing quantity unchanged.
    ///
    /// This is the identity-preserving factory: when the source already is
    /// a [`Quantity`], that very instance comes back and the `nullable`
    /// argument is ignored — the instance keeps its own flag. Repeated
    /// wrapping is therefore idempotent and cheap. Use [`Quantity::new`]
    /// to force re-derivation instead.
    ///
    /// # Errors
    ///
    /// Fails with [`QuantityError::InvalidInput`] for malformed hex
    /// literals and negative integers.
    pub fn wrap(source: impl Into<QuantitySource>, nullable: bool) -> Result<Self, QuantityError> {
        match source.into() {
            QuantitySource::Quantity(quantity) => Ok(quantity),
            other => Self::new(other, nullable),
        }
    }

    /// The canonical zero quantity (`0x0`, empty byte view).
    pub fn zero() -> Self {
        Self {
            value: Some(Vec::new()),
            nullable: false,
        }
    }

    /// The canonical one quantity (`0x1`).
    pub fn one() -> Self {
        Self {
            value: Some(vec![0x01]),
            nullable: false,
        }
    }

    /// Whether an absent value renders as the absent marker.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Renders the canonical hex literal.
    ///
    /// Returns `None` only when the source was absent and the instance is
    /// nullable. An empty-but-present value renders as `"0x0"` even when
    /// nullable; only [`Quantity::to_u64`] folds emptiness into absence.
    pub fn to_hex(&self) -> Option<String> {
        match &self.value {
            None if self.nullable => None,
            value => Some(codec::encode(value.as_deref().unwrap_or(&[]))),
        }
    }

    /// Renders the 64-bit numeric view.
    ///
    /// On a nullable instance both an absent source and an empty value
    /// render as `Ok(None)`; a non-nullable instance coalesces them to
    /// zero. Values wider than eight bytes fail with
    /// [`QuantityError::Overflow`] rather than losing precision; use
    /// [`Quantity::to_biguint`] for those.
    pub fn to_u64(&self) -> Result<Option<u64>, QuantityError> {
        let bytes = self.to_bytes();
        if self.nullable && bytes.is_empty() {
            return Ok(None);
        }
        if bytes.len() > 8 {
            return Err(QuantityError::Overflow {
                hex: codec::encode(bytes),
            });
        }
        let mut value = 0u64;
        for byte in bytes {
            value = (value << 8) | u64::from(*byte);
        }
        Ok(Some(value))
    }

    /// Renders the arbitrary-precision numeric view.
    ///
    /// Same nullable gating as [`Quantity::to_u64`], with no width cap.
    pub fn to_biguint(&self) -> Option<BigUint> {
        let bytes = self.to_bytes();
        if self.nullable && bytes.is_empty() {
            return None;
        }
        Some(BigUint::from_bytes_be(bytes))
    }

    /// The canonical big-endian byte view.
    ///
    /// Absent and empty values both yield the empty slice regardless of
    /// the nullable flag. This is deliberately asymmetric with
    /// [`Quantity::to_hex`] and [`Quantity::to_u64`], which distinguish
    /// absence on nullable instances: consumers of the byte view want raw
    /// bytes, never a marker.
    pub fn to_bytes(&self) -> &[u8] {
        self.value.as_deref().unwrap_or(&[])
    }

    /// Returns a new quantity holding the unsigned sum of `self` and
    /// `addend`.
    ///
    /// The addend may be any accepted source shape, including another
    /// quantity. The sum is computed over the canonical byte encodings, so
    /// magnitude is unbounded. The result carries the receiver's nullable
    /// flag; the receiver is never mutated.
    ///
    /// # Errors
    ///
    /// Fails with [`QuantityError::InvalidInput`] when the addend cannot
    /// be normalized.
    pub fn add(&self, addend: impl Into<QuantitySource>) -> Result<Self, QuantityError> {
        let addend = addend.into().into_canonical_bytes()?.unwrap_or_default();
        Ok(Self {
            value: Some(add_bytes(self.to_bytes(), &addend)),
            nullable: self.nullable,
        })
    }
}

/// Big-endian addition with carry over canonical operands.
///
/// Both inputs are minimal, so the result is minimal as well: the top byte
/// can only be zero when the result itself is empty.
fn add_bytes(lhs: &[u8], rhs: &[u8]) -> Vec<u8> {
    let (long, short) = if lhs.len() >= rhs.len() {
        (lhs, rhs)
    } else {
        (rhs, lhs)
    };
    let mut out = Vec::with_capacity(long.len() + 1);
    let mut carry = 0u16;
    for place in 0..long.len() {
        let a = u16::from(long[long.len() - 1 - place]);
        let b = if place < short.len() {
            u16::from(short[short.len() - 1 - place])
        } else {
            0
        };
        let sum = a + b + carry;
        out.push((sum & 0xff) as u8);
        carry = sum >> 8;
    }
    if carry != 0 {
        out.push(carry as u8);
    }
    out.reverse();
    out
}

/// Equality is defined over the canonical byte view only: absent, empty,
/// and all-zero sources compare equal, and the nullable flag never
/// participates.
impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for Quantity {}

impl Hash for Quantity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bytes().hash(state);
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    /// Parses the canonical hex encoding into a non-nullable quantity.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(QuantitySource::Hex(s.to_owned()), false)
    }
}

/// Serializes as the canonical wire literal; an absent nullable quantity
/// serializes as `null`.
impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_hex() {
            Some(text) => serializer.serialize_str(&text),
            None => serializer.serialize_none(),
        }
    }
}

/// Deserializes from a wire literal or `null`. `null` yields an absent
/// nullable quantity; literals yield non-nullable quantities.
impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => {
                Self::new(QuantitySource::Hex(text), false).map_err(D::Error::custom)
            }
            None => Self::new(QuantitySource::Absent, true).map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_bytes_propagates_carry_across_the_full_width() {
        assert_eq!(add_bytes(&[0xff], &[0x01]), vec![0x01, 0x00]);
        assert_eq!(
            add_bytes(&[0xff, 0xff, 0xff], &[0x01]),
            vec![0x01, 0x00, 0x00, 0x00]
        );
        assert_eq!(add_bytes(&[], &[]), Vec::<u8>::new());
        assert_eq!(add_bytes(&[], &[0x07]), vec![0x07]);
        assert_eq!(add_bytes(&[0x12], &[0x34, 0x56]), vec![0x34, 0x68]);
    }

    #[test]
    fn numeric_view_caps_at_eight_bytes() {
        let max = Quantity::new(u64::MAX, false).unwrap();
        assert_eq!(max.to_u64().unwrap(), Some(u64::MAX));

        let over = max.add(1u64).unwrap();
        assert!(matches!(over.to_u64(), Err(QuantityError::Overflow { .. })));
        assert_eq!(over.to_hex().as_deref(), Some("0x10000000000000000"));
    }

    #[test]
    fn from_str_parses_the_canonical_encoding() {
        let quantity: Quantity = "0x1b".parse().unwrap();
        assert_eq!(quantity.to_u64().unwrap(), Some(0x1b));
        assert!(!quantity.is_nullable());
        assert!("0x".parse::<Quantity>().is_err());
    }

    #[test]
    fn zero_and_one_are_canonical() {
        assert_eq!(Quantity::zero().to_hex().as_deref(), Some("0x0"));
        assert!(Quantity::zero().to_bytes().is_empty());
        assert_eq!(Quantity::one().to_u64().unwrap(), Some(1));
        assert_eq!(Quantity::one().to_bytes(), [0x01]);
    }

    #[test]
    fn equality_ignores_nullable_and_absence() {
        let zero = Quantity::new(0u64, false).unwrap();
        let absent = Quantity::new(QuantitySource::Absent, true).unwrap();
        assert_eq!(zero, absent);

        let a = Quantity::new(5u64, true).unwrap();
        let b = Quantity::new("0x5", false).unwrap();
        assert_eq!(a, b);
    }
}

use regex::Regex;

use crate::error::QuantityError;

/// Pattern for wire literals: `0x` prefix plus at least one hex digit.
const HEX_LITERAL: &str = r"^0x[0-9a-fA-F]+$";

/// Encodes canonical big-endian bytes as the wire literal.
///
/// The empty sequence denotes zero and encodes as exactly `0x0`; any other
/// sequence encodes with a minimal leading digit (no zero padding).
pub fn encode(bytes: &[u8]) -> String {
    match bytes {
        [] => "0x0".to_owned(),
        [first, rest @ ..] => format!("0x{:x}{}", first, hex::encode(rest)),
    }
}

/// Decodes a wire literal into canonical big-endian bytes.
///
/// Digits are case-insensitive and an odd digit count is accepted; the
/// prefix itself must be lowercase `0x` and must be followed by at least
/// one digit.
pub fn decode(text: &str) -> Result<Vec<u8>, QuantityError> {
    if !Regex::new(HEX_LITERAL).expect("invalid regex").is_match(text) {
        let expected = if text == "0x" {
            "strings must contain at least one hexadecimal digit after the 0x prefix"
        } else {
            "strings must be 0x-prefixed hexadecimal"
        };
        return Err(QuantityError::InvalidInput {
            value: format!("{text:?}"),
            expected,
        });
    }
    let digits = &text[2..];
    let padded;
    let digits = if digits.len() % 2 == 1 {
        padded = format!("0{digits}");
        &padded
    } else {
        digits
    };
    let bytes = hex::decode(digits).map_err(|_| QuantityError::InvalidInput {
        value: format!("{text:?}"),
        expected: "strings must be 0x-prefixed hexadecimal",
    })?;
    Ok(strip_leading_zeros(bytes))
}

/// Drops leading zero bytes so the canonical-form invariant holds: a
/// non-empty sequence never begins with a zero byte, and zero is the empty
/// sequence.
pub(crate) fn strip_leading_zeros(bytes: Vec<u8>) -> Vec<u8> {
    match bytes.iter().position(|byte| *byte != 0) {
        Some(0) => bytes,
        Some(first) => bytes[first..].to_vec(),
        None => Vec::new(),
    }
}

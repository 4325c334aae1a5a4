use thiserror::Error;

/// Errors raised when constructing or converting quantities.
#[derive(Debug, Error)]
pub enum QuantityError {
    /// When a source value cannot be interpreted as an unsigned integer.
    #[error("cannot wrap {value} as a JSON-RPC quantity; {expected}")]
    InvalidInput {
        /// Offending source value, rendered for diagnostics.
        value: String,
        /// Short description of the accepted shape.
        expected: &'static str,
    },
    /// When a value is too wide for the 64-bit numeric view.
    #[error("quantity {hex} exceeds the 64-bit numeric view; use `to_biguint` instead")]
    Overflow {
        /// Canonical hex encoding of the oversized value.
        hex: String,
    },
}

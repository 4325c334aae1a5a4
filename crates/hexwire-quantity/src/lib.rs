//! Canonical JSON-RPC value primitives shared across Hexwire components.
//!
//! [`Quantity`] is the unsigned integer exchanged on the JSON-RPC wire. It
//! keeps one canonical representation (`0x` + minimal lowercase hex digits,
//! zero is exactly `0x0`) no matter which source shape a caller supplies,
//! and exposes textual, numeric, and big-endian byte views of the same
//! value. Every field that crosses the RPC boundary as a quantity goes
//! through this crate.
#![deny(missing_docs)]

/// Canonical hex wire encoding helpers.
pub mod codec;
/// Errors raised by construction and conversion.
pub mod error;
/// The quantity value type and its views.
pub mod quantity;
/// Source shapes accepted when constructing a quantity.
pub mod source;

pub use error::QuantityError;
pub use quantity::Quantity;
pub use source::QuantitySource;

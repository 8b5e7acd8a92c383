//! Error types for layout registration and decoding

use thiserror::Error;

/// Error type for registration and decode operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unresolved field type: {record}.{field} is not annotated with a type")]
    UnresolvedFieldType { record: String, field: String },
    #[error("truncated input at slot {slot}: required {required} bytes, {available} available")]
    TruncatedInput {
        slot: usize,
        required: usize,
        available: usize,
    },
    #[error("arity mismatch for {record}: expected {expected} values, found {found}")]
    ArityMismatch {
        record: String,
        expected: usize,
        found: usize,
    },
    #[error("invalid length: expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },
    #[error("invalid bool")]
    InvalidBool,
    #[error("invalid byte order: {0}")]
    InvalidByteOrder(String),
    #[error("value mismatch: expected {expected}, found {found}")]
    ValueMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("value out of range for {0}")]
    OutOfRange(&'static str),
}

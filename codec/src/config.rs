//! Options forwarded to every [crate::CType::decode] call.

use crate::Error;
use core::{fmt, str::FromStr};

/// Byte order used to interpret multi-byte primitives.
///
/// # Examples
///
/// ```
/// use cstruct::ByteOrder;
///
/// assert_eq!("big".parse::<ByteOrder>().unwrap(), ByteOrder::Big);
/// assert_eq!(ByteOrder::default(), ByteOrder::Little);
/// assert!("middle".parse::<ByteOrder>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    /// The byte order of the target platform.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }
}

impl FromStr for ByteOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "little" => Ok(Self::Little),
            "big" => Ok(Self::Big),
            other => Err(Error::InvalidByteOrder(other.to_string())),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Little => f.write_str("little"),
            Self::Big => f.write_str("big"),
        }
    }
}

/// Configuration for a single decode call.
///
/// The record decoder never interprets these itself: it forwards them to the
/// [crate::CType] of every slot (including the slots of nested records).
///
/// # Examples
///
/// ```
/// use cstruct::{ByteOrder, Options};
///
/// let options = Options::new().with_byte_order(ByteOrder::Big).with_signed(true);
/// assert_eq!(options.byte_order, ByteOrder::Big);
/// assert_eq!(options.signed, Some(true));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Options {
    /// The byte order of multi-byte primitives.
    pub byte_order: ByteOrder,

    /// Overrides the declared signedness of integer primitives when set.
    pub signed: Option<bool>,
}

impl Options {
    /// Little-endian, declared signedness.
    pub const fn new() -> Self {
        Self {
            byte_order: ByteOrder::Little,
            signed: None,
        }
    }

    pub const fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub const fn with_signed(mut self, signed: bool) -> Self {
        self.signed = Some(signed);
        self
    }
}

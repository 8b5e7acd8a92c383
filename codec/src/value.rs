//! Decoded values and their conversion into record fields.

use crate::Error;
use core::{any::Any, fmt};

/// A value produced by [crate::CType::decode].
pub enum Value {
    Bool(bool),
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    /// Elements of a fixed-length array, in order.
    Array(Vec<Value>),
    /// A constructed nested record.
    Record(Box<dyn Any + Send>),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::U8(_) => "u8",
            Self::I8(_) => "i8",
            Self::U16(_) => "u16",
            Self::I16(_) => "i16",
            Self::U32(_) => "u32",
            Self::I32(_) => "i32",
            Self::U64(_) => "u64",
            Self::I64(_) => "i64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Array(_) => "array",
            Self::Record(_) => "record",
        }
    }

    /// Recovers a nested record of type `T`.
    pub fn into_record<T: Any>(self) -> Result<T, Error> {
        match self {
            Self::Record(record) => record
                .downcast::<T>()
                .map(|record| *record)
                .map_err(|_| Error::ValueMismatch {
                    expected: core::any::type_name::<T>(),
                    found: "record",
                }),
            other => Err(Error::ValueMismatch {
                expected: core::any::type_name::<T>(),
                found: other.kind(),
            }),
        }
    }

    /// Widens any integer variant to `i128`.
    fn as_integer(&self) -> Option<i128> {
        match *self {
            Self::U8(v) => Some(v.into()),
            Self::I8(v) => Some(v.into()),
            Self::U16(v) => Some(v.into()),
            Self::I16(v) => Some(v.into()),
            Self::U32(v) => Some(v.into()),
            Self::I32(v) => Some(v.into()),
            Self::U64(v) => Some(v.into()),
            Self::I64(v) => Some(v.into()),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::U8(v) => f.debug_tuple("U8").field(v).finish(),
            Self::I8(v) => f.debug_tuple("I8").field(v).finish(),
            Self::U16(v) => f.debug_tuple("U16").field(v).finish(),
            Self::I16(v) => f.debug_tuple("I16").field(v).finish(),
            Self::U32(v) => f.debug_tuple("U32").field(v).finish(),
            Self::I32(v) => f.debug_tuple("I32").field(v).finish(),
            Self::U64(v) => f.debug_tuple("U64").field(v).finish(),
            Self::I64(v) => f.debug_tuple("I64").field(v).finish(),
            Self::F32(v) => f.debug_tuple("F32").field(v).finish(),
            Self::F64(v) => f.debug_tuple("F64").field(v).finish(),
            Self::Array(v) => f.debug_tuple("Array").field(v).finish(),
            Self::Record(_) => f.write_str("Record(..)"),
        }
    }
}

/// Conversion from a decoded [Value] into a record field.
///
/// Integer fields accept any integer value that fits, so a field declared as
/// `u64` may be annotated with a narrower wire type (or decoded with a
/// signedness override).
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, Error>;
}

macro_rules! impl_from_value_integer {
    ($($type:ty),*) => {
        $(
            impl FromValue for $type {
                #[inline]
                fn from_value(value: Value) -> Result<Self, Error> {
                    let wide = value.as_integer().ok_or(Error::ValueMismatch {
                        expected: stringify!($type),
                        found: value.kind(),
                    })?;
                    <$type>::try_from(wide).map_err(|_| Error::OutOfRange(stringify!($type)))
                }
            }
        )*
    };
}

impl_from_value_integer!(u8, i8, u16, i16, u32, i32, u64, i64);

macro_rules! impl_from_value_exact {
    ($type:ty, $variant:ident) => {
        impl FromValue for $type {
            #[inline]
            fn from_value(value: Value) -> Result<Self, Error> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(Error::ValueMismatch {
                        expected: stringify!($type),
                        found: other.kind(),
                    }),
                }
            }
        }
    };
}

impl_from_value_exact!(bool, Bool);
impl_from_value_exact!(f32, F32);

impl FromValue for f64 {
    #[inline]
    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::F64(v) => Ok(v),
            Value::F32(v) => Ok(v.into()),
            other => Err(Error::ValueMismatch {
                expected: "f64",
                found: other.kind(),
            }),
        }
    }
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: Value) -> Result<Self, Error> {
        Ok(value)
    }
}

impl<T: FromValue, const N: usize> FromValue for [T; N] {
    fn from_value(value: Value) -> Result<Self, Error> {
        let elements = match value {
            Value::Array(elements) => elements,
            other => {
                return Err(Error::ValueMismatch {
                    expected: "array",
                    found: other.kind(),
                })
            }
        };
        let elements = elements
            .into_iter()
            .map(T::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        elements
            .try_into()
            .map_err(|elements: Vec<T>| Error::InvalidLength {
                expected: N,
                found: elements.len(),
            })
    }
}

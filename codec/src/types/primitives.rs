//! Fixed-width primitive codecs.
//!
//! Every primitive is naturally aligned (`align == size`), as a C compiler
//! lays out scalar members.
//!
//! ## Byte order & signedness
//! * Multi-byte integers and floats honor [Options::byte_order].
//! * Integers honor [Options::signed]: when set, the bits are reinterpreted as
//!   the signed (or unsigned) integer of the same width, whatever the declared
//!   signedness. Floats and `bool` ignore it.
//! * `bool` occupies one byte and only accepts `0` or `1`.

use crate::{types::exact, AsCType, ByteOrder, CType, Error, Options, TypeRef, Value};
use bytes::Buf;
use paste::paste;

/// The primitive wire types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

impl Primitive {
    /// Whether the declared type is a signed integer.
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Whether the type is an integer.
    pub const fn is_integer(&self) -> bool {
        !matches!(self, Self::Bool | Self::F32 | Self::F64)
    }
}

// Reads an integer of the given width in the requested byte order, then
// picks the signed or unsigned interpretation.
macro_rules! read_integer {
    ($buf:expr, $options:expr, $declared:expr, $unsigned:ident, $signed:ident) => {
        paste! {{
            let raw: $unsigned = match $options.byte_order {
                ByteOrder::Little => $buf.[<get_ $unsigned _le>](),
                ByteOrder::Big => $buf.[<get_ $unsigned>](),
            };
            if $options.signed.unwrap_or($declared) {
                Value::[<$signed:upper>](raw as $signed)
            } else {
                Value::[<$unsigned:upper>](raw)
            }
        }}
    };
}

macro_rules! read_float {
    ($buf:expr, $options:expr, $type:ident) => {
        paste! {
            Value::[<$type:upper>](match $options.byte_order {
                ByteOrder::Little => $buf.[<get_ $type _le>](),
                ByteOrder::Big => $buf.[<get_ $type>](),
            })
        }
    };
}

impl CType for Primitive {
    fn name(&self) -> &str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::I8 => "i8",
            Self::U16 => "u16",
            Self::I16 => "i16",
            Self::U32 => "u32",
            Self::I32 => "i32",
            Self::U64 => "u64",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    #[inline]
    fn size(&self) -> usize {
        match self {
            Self::Bool | Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 => 8,
        }
    }

    #[inline]
    fn align(&self) -> usize {
        self.size()
    }

    fn decode(&self, bytes: &[u8], options: &Options) -> Result<Option<Value>, Error> {
        exact(bytes, self.size())?;
        let mut buf = bytes;
        let declared = self.is_signed();
        let value = match self {
            Self::Bool => match buf.get_u8() {
                0 => Value::Bool(false),
                1 => Value::Bool(true),
                _ => return Err(Error::InvalidBool),
            },
            Self::U8 | Self::I8 => {
                let raw = buf.get_u8();
                if options.signed.unwrap_or(declared) {
                    Value::I8(raw as i8)
                } else {
                    Value::U8(raw)
                }
            }
            Self::U16 | Self::I16 => read_integer!(buf, options, declared, u16, i16),
            Self::U32 | Self::I32 => read_integer!(buf, options, declared, u32, i32),
            Self::U64 | Self::I64 => read_integer!(buf, options, declared, u64, i64),
            Self::F32 => read_float!(buf, options, f32),
            Self::F64 => read_float!(buf, options, f64),
        };
        Ok(Some(value))
    }
}

macro_rules! impl_as_ctype {
    ($type:ty, $variant:ident) => {
        impl AsCType for $type {
            #[inline]
            fn type_ref() -> TypeRef {
                TypeRef::of(Primitive::$variant)
            }
        }
    };
}

impl_as_ctype!(bool, Bool);
impl_as_ctype!(u8, U8);
impl_as_ctype!(i8, I8);
impl_as_ctype!(u16, U16);
impl_as_ctype!(i16, I16);
impl_as_ctype!(u32, U32);
impl_as_ctype!(i32, I32);
impl_as_ctype!(u64, U64);
impl_as_ctype!(i64, I64);
impl_as_ctype!(f32, F32);
impl_as_ctype!(f64, F64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FromValue;

    fn decode<T: FromValue>(primitive: Primitive, bytes: &[u8], options: &Options) -> T {
        let value = primitive.decode(bytes, options).unwrap().unwrap();
        T::from_value(value).unwrap()
    }

    macro_rules! impl_num_test {
        ($type:ty, $variant:ident, $size:expr) => {
            paste! {
                #[test]
                fn [<test_ $type>]() {
                    let primitive = Primitive::$variant;
                    assert_eq!(primitive.size(), $size);
                    assert_eq!(primitive.align(), $size);
                    assert_eq!(primitive.name(), stringify!($type));

                    let little = Options::new();
                    let big = Options::new().with_byte_order(ByteOrder::Big);
                    let values: [$type; 5] =
                        [0 as $type, 1 as $type, 42 as $type, <$type>::MAX, <$type>::MIN];
                    for value in values {
                        let le = value.to_le_bytes();
                        assert_eq!(decode::<$type>(primitive, &le, &little), value);
                        let be = value.to_be_bytes();
                        assert_eq!(decode::<$type>(primitive, &be, &big), value);
                    }
                }
            }
        };
    }

    impl_num_test!(u8, U8, 1);
    impl_num_test!(i8, I8, 1);
    impl_num_test!(u16, U16, 2);
    impl_num_test!(i16, I16, 2);
    impl_num_test!(u32, U32, 4);
    impl_num_test!(i32, I32, 4);
    impl_num_test!(u64, U64, 8);
    impl_num_test!(i64, I64, 8);
    impl_num_test!(f32, F32, 4);
    impl_num_test!(f64, F64, 8);

    #[test]
    fn test_byte_order_differs() {
        let bytes = [0x01, 0x00, 0x00, 0x00];
        let little = Options::new();
        let big = Options::new().with_byte_order(ByteOrder::Big);
        assert_eq!(decode::<u32>(Primitive::U32, &bytes, &little), 1);
        assert_eq!(decode::<u32>(Primitive::U32, &bytes, &big), 0x0100_0000);
    }

    #[test]
    fn test_signed_override() {
        let signed = Options::new().with_signed(true);
        let unsigned = Options::new().with_signed(false);

        let value = Primitive::U8.decode(&[0xFF], &signed).unwrap().unwrap();
        assert!(matches!(value, Value::I8(-1)));

        let value = Primitive::I16
            .decode(&[0xFF, 0xFF], &unsigned)
            .unwrap()
            .unwrap();
        assert!(matches!(value, Value::U16(0xFFFF)));

        let value = Primitive::I32
            .decode(&[0xFE, 0xFF, 0xFF, 0xFF], &Options::new())
            .unwrap()
            .unwrap();
        assert!(matches!(value, Value::I32(-2)));
    }

    #[test]
    fn test_signed_ignored_for_floats() {
        let options = Options::new().with_signed(true);
        let value = Primitive::F32
            .decode(&1.5f32.to_le_bytes(), &options)
            .unwrap()
            .unwrap();
        assert!(matches!(value, Value::F32(v) if v == 1.5));
    }

    #[test]
    fn test_bool() {
        let options = Options::new();
        assert!(decode::<bool>(Primitive::Bool, &[1], &options));
        assert!(!decode::<bool>(Primitive::Bool, &[0], &options));
        assert_eq!(
            Primitive::Bool.decode(&[2], &options).unwrap_err(),
            Error::InvalidBool
        );
    }

    #[test]
    fn test_wrong_length() {
        let result = Primitive::U32.decode(&[1, 2], &Options::new());
        assert_eq!(
            result.unwrap_err(),
            Error::InvalidLength {
                expected: 4,
                found: 2
            }
        );
    }

    #[test]
    fn test_classification() {
        assert!(Primitive::I64.is_signed());
        assert!(!Primitive::U64.is_signed());
        assert!(Primitive::U8.is_integer());
        assert!(!Primitive::F64.is_integer());
        assert!(!Primitive::Bool.is_integer());
    }
}

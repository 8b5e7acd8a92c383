//! Walk a [Layout] over a byte buffer and assemble a record.
//!
//! Each slot takes exactly its size in bytes from the buffer and decodes them
//! with its [crate::CType]. Values are collected in slot order, padding (and
//! any type that yields no value) is dropped, and the remaining values are
//! handed to the record's [Constructor].
//!
//! Input shorter than the layout is rejected up front with
//! [Error::TruncatedInput], naming the first slot that cannot be filled. No
//! slot is decoded in that case.

use crate::{layout::Layout, record::Constructor, Error, Options};
use bytes::Buf;
use tracing::trace;

/// Builds the truncation error for a buffer holding `available` bytes.
fn truncated(layout: &Layout, available: usize) -> Error {
    let (slot, required, available) = layout
        .slots()
        .iter()
        .enumerate()
        .find(|(_, slot)| slot.end() > available)
        .map(|(index, slot)| {
            (
                index,
                slot.size(),
                available.saturating_sub(slot.offset()),
            )
        })
        .unwrap_or((layout.slots().len(), layout.size(), available));
    Error::TruncatedInput {
        slot,
        required,
        available,
    }
}

/// Reads one record, consuming exactly [Layout::size] bytes from `buf`.
///
/// Bytes after the record are left in `buf`, so consecutive records can be
/// read from the same buffer.
pub fn read<T>(
    layout: &Layout,
    constructor: &Constructor<T>,
    buf: &mut impl Buf,
    options: &Options,
) -> Result<T, Error> {
    let available = buf.remaining();
    if available < layout.size() {
        return Err(truncated(layout, available));
    }

    let mut values = Vec::with_capacity(constructor.arity());
    for slot in layout.slots() {
        let bytes = buf.copy_to_bytes(slot.size());
        if let Some(value) = slot.ctype().decode(&bytes, options)? {
            values.push(value);
        }
    }
    constructor.construct(values)
}

/// Decodes one record from the start of `buf`.
///
/// `buf` must hold at least [Layout::size] bytes; any surplus is ignored.
pub fn decode<T>(
    layout: &Layout,
    constructor: &Constructor<T>,
    mut buf: impl Buf,
    options: &Options,
) -> Result<T, Error> {
    let record = read(layout, constructor, &mut buf, options)?;
    let remaining = buf.remaining();
    if remaining > 0 {
        trace!(
            record = constructor.record(),
            remaining,
            "ignoring bytes after record"
        );
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{layout::Builder, ByteOrder, CType, FromValue, Primitive, Value};
    use bytes::Bytes;
    use cstruct_macros::test_traced;
    use std::sync::Arc;

    #[derive(Debug, PartialEq)]
    struct Pair {
        a: i32,
        b: u8,
    }

    fn pair_layout() -> Layout {
        let fields: [Arc<dyn CType>; 2] = [Arc::new(Primitive::I32), Arc::new(Primitive::U8)];
        Builder::new().build(fields)
    }

    fn pair_constructor() -> Constructor<Pair> {
        Constructor::new("Pair", 2, |values| {
            let [a, b]: [Value; 2] = values.try_into().map_err(|values: Vec<Value>| {
                Error::ArityMismatch {
                    record: "Pair".into(),
                    expected: 2,
                    found: values.len(),
                }
            })?;
            Ok(Pair {
                a: i32::from_value(a)?,
                b: u8::from_value(b)?,
            })
        })
    }

    #[test_traced]
    fn test_decode() {
        let layout = pair_layout();
        let raw = [1u8, 0, 0, 0, 255, 0, 0, 0];
        let pair = decode(&layout, &pair_constructor(), &raw[..], &Options::new()).unwrap();
        assert_eq!(pair, Pair { a: 1, b: 255 });
    }

    #[test]
    fn test_decode_padding_content_ignored() {
        let layout = pair_layout();
        let raw = [1u8, 0, 0, 0xFF, 2, 0, 0, 0xFF];
        let pair = decode(&layout, &pair_constructor(), &raw[..], &Options::new()).unwrap();
        assert_eq!(
            pair,
            Pair {
                a: i32::from_le_bytes([1, 0, 0, 0xFF]),
                b: 2
            }
        );
    }

    #[test]
    fn test_decode_big_endian() {
        let layout = pair_layout();
        let raw = [0u8, 0, 1, 0, 7, 0, 0, 0];
        let options = Options::new().with_byte_order(ByteOrder::Big);
        let pair = decode(&layout, &pair_constructor(), &raw[..], &options).unwrap();
        assert_eq!(pair, Pair { a: 256, b: 7 });
    }

    #[test]
    fn test_decode_ignores_surplus() {
        let layout = pair_layout();
        let raw = Bytes::from_static(&[2, 0, 0, 0, 3, 0, 0, 0, 9, 9]);
        let pair = decode(&layout, &pair_constructor(), raw, &Options::new()).unwrap();
        assert_eq!(pair, Pair { a: 2, b: 3 });
    }

    #[test]
    fn test_truncated_in_field() {
        let layout = pair_layout();
        let result = decode(&layout, &pair_constructor(), &[1u8, 0, 0][..], &Options::new());
        assert_eq!(
            result.unwrap_err(),
            Error::TruncatedInput {
                slot: 0,
                required: 4,
                available: 3
            }
        );
    }

    #[test]
    fn test_truncated_in_padding() {
        let layout = pair_layout();
        let result = decode(
            &layout,
            &pair_constructor(),
            &[1u8, 0, 0, 0, 5, 0][..],
            &Options::new(),
        );
        assert_eq!(
            result.unwrap_err(),
            Error::TruncatedInput {
                slot: 2,
                required: 3,
                available: 1
            }
        );
    }

    #[test]
    fn test_truncated_empty() {
        let layout = pair_layout();
        let result = decode(&layout, &pair_constructor(), &[0u8; 0][..], &Options::new());
        assert_eq!(
            result.unwrap_err(),
            Error::TruncatedInput {
                slot: 0,
                required: 4,
                available: 0
            }
        );
    }

    #[test]
    fn test_read_consecutive() {
        let layout = pair_layout();
        let constructor = pair_constructor();
        let mut buf = &[1u8, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 4, 0, 0, 0][..];
        let first = read(&layout, &constructor, &mut buf, &Options::new()).unwrap();
        let second = read(&layout, &constructor, &mut buf, &Options::new()).unwrap();
        assert_eq!(first, Pair { a: 1, b: 2 });
        assert_eq!(second, Pair { a: 3, b: 4 });
        assert!(buf.is_empty());
    }

    #[test]
    fn test_arity_mismatch() {
        let layout = pair_layout();
        let constructor: Constructor<Pair> =
            Constructor::new("Pair", 3, |_| unreachable!("arity is checked first"));
        let result = decode(&layout, &constructor, &[0u8; 8][..], &Options::new());
        assert_eq!(
            result.unwrap_err(),
            Error::ArityMismatch {
                record: "Pair".into(),
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_codec_error_propagates() {
        let fields: [Arc<dyn CType>; 1] = [Arc::new(Primitive::Bool)];
        let layout = Builder::new().build(fields);
        let constructor = Constructor::new("Flag", 1, |mut values: Vec<Value>| {
            bool::from_value(values.remove(0))
        });
        let result = decode(&layout, &constructor, &[3u8][..], &Options::new());
        assert_eq!(result.unwrap_err(), Error::InvalidBool);
    }
}

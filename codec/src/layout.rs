//! Compute the byte layout of a record from its ordered field types.
//!
//! Fields are placed in declaration order, never reordered. Before each field
//! the builder inserts the smallest [Padding] that brings the offset to a
//! multiple of the field's alignment, as a C compiler does. The record's
//! alignment is the largest field alignment.
//!
//! By default the builder also pads the end of the record so that its size is
//! a multiple of its alignment (strict C sizing, which keeps arrays of records
//! aligned). [Builder::trailing_padding] disables that.
//!
//! # Example
//!
//! ```
//! use cstruct::{layout::Builder, CType, Primitive};
//! use std::sync::Arc;
//!
//! // struct { int32_t a; uint8_t b; }
//! let fields: [Arc<dyn CType>; 2] = [Arc::new(Primitive::I32), Arc::new(Primitive::U8)];
//! let layout = Builder::new().build(fields);
//! assert_eq!(layout.size(), 8);
//! assert_eq!(layout.align(), 4);
//! assert_eq!(layout.slots().len(), 3);
//! assert_eq!(layout.slots()[2].offset(), 5);
//! assert!(layout.slots()[2].is_padding());
//! ```

use crate::{CType, Padding};
use std::sync::Arc;
use tracing::debug;

/// One entry of a [Layout]: a field's type or padding, at a byte offset.
#[derive(Clone, Debug)]
pub struct Slot {
    ctype: Arc<dyn CType>,
    offset: usize,
}

impl Slot {
    pub fn ctype(&self) -> &Arc<dyn CType> {
        &self.ctype
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn size(&self) -> usize {
        self.ctype.size()
    }

    /// The offset one past the last byte of this slot.
    pub fn end(&self) -> usize {
        self.offset + self.ctype.size()
    }

    pub fn is_padding(&self) -> bool {
        self.ctype.is_padding()
    }
}

/// The immutable byte-level plan for a record type.
#[derive(Clone, Debug)]
pub struct Layout {
    slots: Vec<Slot>,
    size: usize,
    align: usize,
}

impl Layout {
    /// All slots, padding included, in offset order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slots that hold a record field.
    pub fn fields(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|slot| !slot.is_padding())
    }

    /// Total bytes consumed by one record.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn align(&self) -> usize {
        self.align
    }

    /// Total bytes of inserted padding.
    pub fn padding(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.is_padding())
            .map(Slot::size)
            .sum()
    }
}

/// Returns the smallest padding that makes `offset` a multiple of `align`.
#[inline]
pub fn padding_for(offset: usize, align: usize) -> usize {
    (align - offset % align) % align
}

/// Builds a [Layout] from an ordered list of field types.
#[derive(Clone, Copy, Debug)]
pub struct Builder {
    trailing_padding: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            trailing_padding: true,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to pad the record size up to a multiple of its alignment.
    pub fn trailing_padding(mut self, enabled: bool) -> Self {
        self.trailing_padding = enabled;
        self
    }

    /// Lays out `ctypes` in order.
    ///
    /// Never fails: every type with a non-zero alignment can be placed.
    pub fn build(&self, ctypes: impl IntoIterator<Item = Arc<dyn CType>>) -> Layout {
        let mut slots = Vec::new();
        let mut offset = 0;
        let mut align = 1;

        for ctype in ctypes {
            let padding = padding_for(offset, ctype.align());
            if padding > 0 {
                slots.push(Slot {
                    ctype: Arc::new(Padding::new(padding)),
                    offset,
                });
                offset += padding;
            }

            align = align.max(ctype.align());
            let size = ctype.size();
            slots.push(Slot { ctype, offset });
            offset += size;
        }

        if self.trailing_padding {
            let padding = padding_for(offset, align);
            if padding > 0 {
                slots.push(Slot {
                    ctype: Arc::new(Padding::new(padding)),
                    offset,
                });
                offset += padding;
            }
        }

        debug!(size = offset, align, slots = slots.len(), "built layout");
        Layout {
            slots,
            size: offset,
            align,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Array, Primitive};
    use cstruct_macros::test_traced;

    fn ctypes(primitives: &[Primitive]) -> Vec<Arc<dyn CType>> {
        primitives
            .iter()
            .map(|p| Arc::new(*p) as Arc<dyn CType>)
            .collect()
    }

    /// Checks the alignment, packing, size and no-reorder laws.
    fn check_laws(layout: &Layout, input: &[Arc<dyn CType>]) {
        for slot in layout.slots() {
            assert_eq!(slot.offset() % slot.ctype().align(), 0);
        }
        for pair in layout.slots().windows(2) {
            assert_eq!(pair[0].end(), pair[1].offset());
        }
        let end = layout.slots().last().map(Slot::end).unwrap_or(0);
        assert_eq!(layout.size(), end);

        let fields: Vec<_> = layout.fields().map(|slot| slot.ctype().name()).collect();
        let expected: Vec<_> = input.iter().map(|ctype| ctype.name()).collect();
        assert_eq!(fields, expected);
    }

    #[test_traced]
    fn test_int_then_byte() {
        let input = ctypes(&[Primitive::I32, Primitive::U8]);
        let layout = Builder::new().build(input.clone());
        check_laws(&layout, &input);

        assert_eq!(layout.size(), 8);
        assert_eq!(layout.align(), 4);
        let offsets: Vec<_> = layout.slots().iter().map(Slot::offset).collect();
        assert_eq!(offsets, [0, 4, 5]);
        assert!(layout.slots()[2].is_padding());
        assert_eq!(layout.slots()[2].size(), 3);
        assert_eq!(layout.padding(), 3);
    }

    #[test]
    fn test_interior_padding() {
        // struct { char a; double b; short c; }
        let input = ctypes(&[Primitive::U8, Primitive::F64, Primitive::I16]);
        let layout = Builder::new().build(input.clone());
        check_laws(&layout, &input);

        let plan: Vec<_> = layout
            .slots()
            .iter()
            .map(|slot| (slot.ctype().name().to_string(), slot.offset()))
            .collect();
        assert_eq!(
            plan,
            [
                ("u8".to_string(), 0),
                ("padding".to_string(), 1),
                ("f64".to_string(), 8),
                ("i16".to_string(), 16),
                ("padding".to_string(), 18),
            ]
        );
        assert_eq!(layout.size(), 24);
        assert_eq!(layout.align(), 8);
    }

    #[test]
    fn test_no_trailing_padding() {
        let input = ctypes(&[Primitive::I32, Primitive::U8]);
        let layout = Builder::new().trailing_padding(false).build(input.clone());
        check_laws(&layout, &input);
        assert_eq!(layout.size(), 5);
        assert_eq!(layout.align(), 4);
        assert_eq!(layout.slots().len(), 2);
        assert_eq!(layout.padding(), 0);
    }

    #[test]
    fn test_already_aligned() {
        let input = ctypes(&[Primitive::U8, Primitive::U8, Primitive::U16, Primitive::U32]);
        let layout = Builder::new().build(input.clone());
        check_laws(&layout, &input);
        assert_eq!(layout.size(), 8);
        assert_eq!(layout.padding(), 0);
    }

    #[test]
    fn test_empty() {
        let layout = Builder::new().build(Vec::new());
        assert_eq!(layout.size(), 0);
        assert_eq!(layout.align(), 1);
        assert!(layout.slots().is_empty());
    }

    #[test]
    fn test_array_aligns_like_element() {
        let input: Vec<Arc<dyn CType>> = vec![
            Arc::new(Primitive::U8),
            Arc::new(Array::new(Arc::new(Primitive::U32), 3)),
        ];
        let layout = Builder::new().build(input.clone());
        check_laws(&layout, &input);
        assert_eq!(layout.slots()[2].offset(), 4);
        assert_eq!(layout.size(), 16);
        assert_eq!(layout.align(), 4);
    }

    #[test]
    fn test_deterministic() {
        let input = ctypes(&[Primitive::U16, Primitive::I64, Primitive::Bool]);
        let first = Builder::new().build(input.clone());
        let second = Builder::new().build(input);
        let plan = |layout: &Layout| {
            layout
                .slots()
                .iter()
                .map(|slot| (slot.offset(), slot.size(), slot.is_padding()))
                .collect::<Vec<_>>()
        };
        assert_eq!(plan(&first), plan(&second));
        assert_eq!(first.size(), second.size());
        assert_eq!(first.align(), second.align());
    }

    #[test]
    fn test_padding_for() {
        assert_eq!(padding_for(0, 8), 0);
        assert_eq!(padding_for(1, 8), 7);
        assert_eq!(padding_for(5, 4), 3);
        assert_eq!(padding_for(6, 2), 0);
        assert_eq!(padding_for(3, 1), 0);
    }
}

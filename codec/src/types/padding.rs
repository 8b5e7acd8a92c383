//! Alignment filler.

use crate::{types::exact, CType, Error, Options, Value};

/// `N` bytes of layout filler: consumes input, produces no value.
///
/// Padding has an alignment of 1 so it never forces further padding itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Padding(usize);

impl Padding {
    pub const fn new(len: usize) -> Self {
        Self(len)
    }

    pub const fn len(&self) -> usize {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl CType for Padding {
    fn name(&self) -> &str {
        "padding"
    }

    #[inline]
    fn size(&self) -> usize {
        self.0
    }

    #[inline]
    fn align(&self) -> usize {
        1
    }

    #[inline]
    fn decode(&self, bytes: &[u8], _: &Options) -> Result<Option<Value>, Error> {
        exact(bytes, self.0)?;
        Ok(None)
    }

    fn is_padding(&self) -> bool {
        true
    }
}

//! Fixed-length arrays of any [CType].

use crate::{types::exact, CType, Error, Options, Value};
use std::sync::Arc;

/// `len` consecutive elements of the same type, aligned like one element.
///
/// C arrays carry no padding between elements: the element size is already a
/// multiple of its alignment for every well-formed element type.
#[derive(Clone, Debug)]
pub struct Array {
    element: Arc<dyn CType>,
    len: usize,
    name: String,
}

impl Array {
    pub fn new(element: Arc<dyn CType>, len: usize) -> Self {
        let name = format!("[{}; {}]", element.name(), len);
        Self { element, len, name }
    }

    pub fn element(&self) -> &Arc<dyn CType> {
        &self.element
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl CType for Array {
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn size(&self) -> usize {
        self.element.size() * self.len
    }

    #[inline]
    fn align(&self) -> usize {
        self.element.align()
    }

    fn decode(&self, bytes: &[u8], options: &Options) -> Result<Option<Value>, Error> {
        exact(bytes, self.size())?;
        let mut elements = Vec::with_capacity(self.len);
        let element_size = self.element.size();
        for index in 0..self.len {
            let start = index * element_size;
            let chunk = &bytes[start..start + element_size];
            if let Some(value) = self.element.decode(chunk, options)? {
                elements.push(value);
            }
        }
        Ok(Some(Value::Array(elements)))
    }
}

//! The type capability contract and its built-in implementations.
//!
//! Every wire-representable type implements [CType]: a constant size, a
//! constant alignment, and a decode operation over exactly `size` bytes.
//! New wire types are new implementors of the same trait; neither the
//! [crate::layout::Builder] nor the [crate::decoder] need to know about them.

use crate::{Error, Options, Value};
use core::fmt;
use std::sync::Arc;

pub mod array;
pub mod padding;
pub mod primitives;

pub use array::Array;
pub use padding::Padding;
pub use primitives::Primitive;

/// A type with a fixed binary size and alignment that can decode itself.
pub trait CType: fmt::Debug + Send + Sync {
    /// Human-readable name, used in logs and diagnostics.
    fn name(&self) -> &str;

    /// The number of bytes this type occupies. Constant for a given type.
    fn size(&self) -> usize;

    /// The alignment of this type in bytes. Constant and at least 1.
    fn align(&self) -> usize;

    /// Decodes `bytes`, which is exactly [CType::size] bytes long.
    ///
    /// Returns `Ok(None)` for types that consume input but produce no value.
    fn decode(&self, bytes: &[u8], options: &Options) -> Result<Option<Value>, Error>;

    /// Whether this type is layout filler rather than a record field.
    fn is_padding(&self) -> bool {
        false
    }
}

/// Checks that a codec was handed exactly `expected` bytes.
#[inline]
pub(crate) fn exact(bytes: &[u8], expected: usize) -> Result<(), Error> {
    if bytes.len() != expected {
        return Err(Error::InvalidLength {
            expected,
            found: bytes.len(),
        });
    }
    Ok(())
}

/// A provider of a [CType], resolved lazily during registration.
pub type Provider = fn() -> Result<Arc<dyn CType>, Error>;

/// A piece of type information attached to a field: either its nominal type
/// or one of its metadata entries.
#[derive(Clone)]
pub enum TypeRef {
    /// Is a type capability.
    Type(Arc<dyn CType>),
    /// Exposes a type capability through a provider.
    Provider(Provider),
    /// Carries no type capability (a plain Rust type, documentation, ...).
    Opaque(&'static str),
}

impl TypeRef {
    /// Wraps a type capability.
    pub fn of(ctype: impl CType + 'static) -> Self {
        Self::Type(Arc::new(ctype))
    }

    /// Returns the type capability this entry is or exposes, if any.
    pub fn ctype(&self) -> Result<Option<Arc<dyn CType>>, Error> {
        match self {
            Self::Type(ctype) => Ok(Some(ctype.clone())),
            Self::Provider(provider) => provider().map(Some),
            Self::Opaque(_) => Ok(None),
        }
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(ctype) => f.debug_tuple("Type").field(&ctype.name()).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
            Self::Opaque(name) => f.debug_tuple("Opaque").field(name).finish(),
        }
    }
}

/// Rust types whose wire representation is known without annotation.
///
/// Implemented for the numeric primitives, `bool`, fixed-length arrays of
/// such types, and every `#[derive(CStruct)]` record.
pub trait AsCType {
    fn type_ref() -> TypeRef;
}

fn array_provider<T: AsCType, const N: usize>() -> Result<Arc<dyn CType>, Error> {
    let element = T::type_ref();
    let element = element.ctype()?.ok_or(Error::UnresolvedFieldType {
        record: "array".into(),
        field: format!("{element:?}"),
    })?;
    Ok(Arc::new(Array::new(element, N)))
}

impl<T: AsCType, const N: usize> AsCType for [T; N] {
    fn type_ref() -> TypeRef {
        TypeRef::Provider(array_provider::<T, N>)
    }
}

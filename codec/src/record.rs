//! Bind a record's constructor to its computed [Layout].
//!
//! A [RecordType] is created once per record type: its fields are resolved,
//! its layout built, and its constructor arity checked against the layout.
//! After registration it is immutable and may be shared across threads for
//! any number of concurrent decodes.

use crate::{
    decoder,
    layout::{Builder, Layout},
    resolver::{resolve_all, FieldDescriptor, MetadataResolver, Resolver},
    types::exact,
    CType, Error, Options, Value,
};
use bytes::Buf;
use core::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builds a record from its decoded field values, in declaration order.
pub struct Constructor<T> {
    record: String,
    arity: usize,
    build: fn(Vec<Value>) -> Result<T, Error>,
}

impl<T> Constructor<T> {
    pub fn new(
        record: impl Into<String>,
        arity: usize,
        build: fn(Vec<Value>) -> Result<T, Error>,
    ) -> Self {
        Self {
            record: record.into(),
            arity,
            build,
        }
    }

    /// The name of the record, used in errors and logs.
    pub fn record(&self) -> &str {
        &self.record
    }

    /// The number of values the constructor takes.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Invokes the constructor, rejecting the wrong number of values.
    pub fn construct(&self, values: Vec<Value>) -> Result<T, Error> {
        if values.len() != self.arity {
            return Err(Error::ArityMismatch {
                record: self.record.clone(),
                expected: self.arity,
                found: values.len(),
            });
        }
        (self.build)(values)
    }
}

impl<T> Clone for Constructor<T> {
    fn clone(&self) -> Self {
        Self {
            record: self.record.clone(),
            arity: self.arity,
            build: self.build,
        }
    }
}

impl<T> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("record", &self.record)
            .field("arity", &self.arity)
            .finish()
    }
}

/// A registered record type: its layout and its constructor.
pub struct RecordType<T> {
    layout: Layout,
    constructor: Constructor<T>,
}

impl<T> RecordType<T> {
    /// Registers a record with the default resolver and builder.
    pub fn register(
        fields: &[FieldDescriptor],
        constructor: Constructor<T>,
    ) -> Result<Self, Error> {
        Self::register_with(&MetadataResolver, &Builder::default(), fields, constructor)
    }

    /// Registers a record with a custom resolver and builder.
    ///
    /// Fails if a field cannot be resolved, or if the layout does not hold
    /// exactly one field slot per constructor argument.
    pub fn register_with(
        resolver: &impl Resolver,
        builder: &Builder,
        fields: &[FieldDescriptor],
        constructor: Constructor<T>,
    ) -> Result<Self, Error> {
        let ctypes = resolve_all(resolver, constructor.record(), fields)?;
        let layout = builder.build(ctypes);

        let found = layout.fields().count();
        if found != constructor.arity() {
            return Err(Error::ArityMismatch {
                record: constructor.record().to_string(),
                expected: constructor.arity(),
                found,
            });
        }

        debug!(
            record = constructor.record(),
            size = layout.size(),
            align = layout.align(),
            fields = found,
            padding = layout.padding(),
            "registered record type"
        );
        Ok(Self {
            layout,
            constructor,
        })
    }

    pub fn name(&self) -> &str {
        self.constructor.record()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn constructor(&self) -> &Constructor<T> {
        &self.constructor
    }

    /// Decodes a record from the start of `buf`, ignoring any surplus bytes.
    pub fn decode(&self, buf: impl Buf, options: &Options) -> Result<T, Error> {
        decoder::decode(&self.layout, &self.constructor, buf, options)
    }

    /// Reads a record from `buf`, leaving any following bytes in place.
    pub fn read(&self, buf: &mut impl Buf, options: &Options) -> Result<T, Error> {
        decoder::read(&self.layout, &self.constructor, buf, options)
    }
}

impl<T> fmt::Debug for RecordType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.name())
            .field("size", &self.layout.size())
            .field("align", &self.layout.align())
            .field("arity", &self.constructor.arity())
            .finish()
    }
}

// A registered record is itself a type, so records nest.
impl<T: Send + 'static> CType for RecordType<T> {
    fn name(&self) -> &str {
        self.constructor.record()
    }

    #[inline]
    fn size(&self) -> usize {
        self.layout.size()
    }

    #[inline]
    fn align(&self) -> usize {
        self.layout.align()
    }

    fn decode(&self, bytes: &[u8], options: &Options) -> Result<Option<Value>, Error> {
        exact(bytes, self.layout.size())?;
        let mut buf = bytes;
        let record = self.read(&mut buf, options)?;
        Ok(Some(Value::Record(Box::new(record))))
    }
}

/// A record type declared with `#[derive(CStruct)]`.
///
/// Registration happens on first use and is memoized: every later call to
/// [CStruct::record_type] returns the same [RecordType] (or the same
/// registration error).
pub trait CStruct: Sized + Send + 'static {
    /// The record's name.
    const NAME: &'static str;

    /// The declared fields, in declaration order.
    fn fields() -> Vec<FieldDescriptor>;

    /// The record's constructor, taking one value per field.
    fn constructor() -> Constructor<Self>;

    /// The registered record type.
    fn record_type() -> Result<Arc<RecordType<Self>>, Error>;

    /// Decodes a little-endian record from the start of `buf`.
    fn decode(buf: impl Buf) -> Result<Self, Error> {
        Self::decode_with(buf, &Options::default())
    }

    /// Decodes a record from the start of `buf` with explicit options.
    fn decode_with(buf: impl Buf, options: &Options) -> Result<Self, Error> {
        Self::record_type()?.decode(buf, options)
    }
}

/// Registers `T` from its declared fields and constructor.
pub fn register<T: CStruct>() -> Result<RecordType<T>, Error> {
    RecordType::register(&T::fields(), T::constructor())
}

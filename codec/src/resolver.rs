//! Map declared fields to their [CType].
//!
//! A field is declared with a nominal type and zero or more metadata entries
//! (see [FieldDescriptor]). Resolution picks the first of, in order:
//!
//! 1. the first metadata entry that is, or exposes, a [CType];
//! 2. the nominal type, if it is or exposes a [CType].
//!
//! Metadata therefore overrides the nominal type. A field matching neither is
//! rejected with [Error::UnresolvedFieldType].

use crate::{CType, Error, TypeRef};
use std::sync::Arc;

/// A declared record field, in declaration order.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    name: String,
    nominal: TypeRef,
    metadata: Vec<TypeRef>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, nominal: TypeRef) -> Self {
        Self {
            name: name.into(),
            nominal,
            metadata: Vec::new(),
        }
    }

    /// Appends a metadata entry. Entries are scanned in the order added.
    pub fn with_metadata(mut self, entry: TypeRef) -> Self {
        self.metadata.push(entry);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nominal(&self) -> &TypeRef {
        &self.nominal
    }

    pub fn metadata(&self) -> &[TypeRef] {
        &self.metadata
    }
}

/// Determines which [CType] governs a field.
pub trait Resolver {
    fn resolve(&self, record: &str, field: &FieldDescriptor) -> Result<Arc<dyn CType>, Error>;
}

/// Metadata first, then the nominal type.
#[derive(Clone, Copy, Debug, Default)]
pub struct MetadataResolver;

impl Resolver for MetadataResolver {
    fn resolve(&self, record: &str, field: &FieldDescriptor) -> Result<Arc<dyn CType>, Error> {
        resolve(record, field)
    }
}

/// Resolves a single field of `record` with the default precedence.
pub fn resolve(record: &str, field: &FieldDescriptor) -> Result<Arc<dyn CType>, Error> {
    for entry in field.metadata() {
        if let Some(ctype) = entry.ctype()? {
            return Ok(ctype);
        }
    }
    field
        .nominal()
        .ctype()?
        .ok_or_else(|| Error::UnresolvedFieldType {
            record: record.to_string(),
            field: field.name().to_string(),
        })
}

/// Resolves every field of `record`, preserving declaration order.
pub fn resolve_all(
    resolver: &impl Resolver,
    record: &str,
    fields: &[FieldDescriptor],
) -> Result<Vec<Arc<dyn CType>>, Error> {
    fields
        .iter()
        .map(|field| resolver.resolve(record, field))
        .collect()
}

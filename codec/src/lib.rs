//! Compute C struct layouts and decode flat byte buffers into records.
//!
//! # Overview
//!
//! A record is declared as an ordered list of typed fields. From it, this crate:
//! - Computes the record's binary layout: per-field offsets, the alignment
//!   padding a C compiler would insert, and the aggregate size and alignment.
//! - Decodes a raw byte buffer into the record by walking that layout, slicing
//!   out each field's bytes and decoding them with the field's type.
//!
//! # Pipeline
//!
//! ```text
//! FieldDescriptor* --resolver--> CType* --layout::Builder--> Layout --decoder--> record
//! ```
//!
//! Every wire type implements [CType] (size, alignment, decode). Built in are
//! the [Primitive] scalars, fixed-length [Array]s, alignment [Padding], and
//! registered records ([RecordType]), which nest.
//!
//! # Example (Derived)
//!
//! ```
//! use cstruct::{ByteOrder, CStruct, Options};
//!
//! #[derive(Debug, PartialEq, CStruct)]
//! struct Bella {
//!     a: i32,
//!     b: u8,
//! }
//!
//! let record = Bella::record_type().unwrap();
//! assert_eq!(record.layout().size(), 8);
//! assert_eq!(record.layout().align(), 4);
//!
//! let bella = Bella::decode(&[1u8, 0, 0, 0, 255, 0, 0, 0][..]).unwrap();
//! assert_eq!(bella, Bella { a: 1, b: 255 });
//!
//! let options = Options::new().with_byte_order(ByteOrder::Big);
//! let bella = Bella::decode_with(&[0u8, 0, 0, 1, 7, 0, 0, 0][..], &options).unwrap();
//! assert_eq!(bella, Bella { a: 1, b: 7 });
//! ```
//!
//! # Example (Manual)
//!
//! ```
//! use cstruct::{Constructor, FieldDescriptor, FromValue, Options, Primitive, RecordType, TypeRef};
//!
//! // A field declared as a plain integer, annotated with its wire type.
//! let fields = [
//!     FieldDescriptor::new("id", TypeRef::Opaque("int")).with_metadata(TypeRef::of(Primitive::U16)),
//!     FieldDescriptor::new("value", TypeRef::of(Primitive::F64)),
//! ];
//! let constructor = Constructor::new("Sample", 2, |mut values| {
//!     let value = f64::from_value(values.pop().unwrap())?;
//!     let id = u16::from_value(values.pop().unwrap())?;
//!     Ok((id, value))
//! });
//! let sample = RecordType::register(&fields, constructor).unwrap();
//! assert_eq!(sample.layout().size(), 16);
//!
//! let mut raw = vec![7, 0, 0, 0, 0, 0, 0, 0];
//! raw.extend_from_slice(&2.5f64.to_le_bytes());
//! assert_eq!(sample.decode(&raw[..], &Options::new()).unwrap(), (7, 2.5));
//! ```

pub mod config;
pub mod decoder;
pub mod error;
pub mod layout;
pub mod record;
pub mod resolver;
pub mod types;
pub mod value;

// Re-export main types and traits
pub use config::{ByteOrder, Options};
pub use error::Error;
pub use layout::{Builder, Layout, Slot};
pub use record::{register, CStruct, Constructor, RecordType};
pub use resolver::{FieldDescriptor, MetadataResolver, Resolver};
pub use types::{Array, AsCType, CType, Padding, Primitive, Provider, TypeRef};
pub use value::{FromValue, Value};

// Derive macro, sharing its name with the trait it implements.
pub use cstruct_macros::CStruct;

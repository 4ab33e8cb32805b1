//! Static decoding schema for the Retrowatch state mirror.
//!
//! This crate answers two questions the engine deliberately does not:
//! *where* each mirrored field lives in the remote address space
//! ([`MemoryLayout`]) and *what* its bytes mean ([`SchemaDecoder`]).
//! The shipped implementation targets Generation I (Red/Blue) on the
//! Game Boy.
//!
//! # Modules
//!
//! - [`decoder`] -- [`SchemaDecoder`] trait, [`FieldKind`], [`DomainValue`],
//!   and [`Gen1Decoder`]
//! - [`layout`] -- Address map and bounded collection sizes
//! - [`tables`] -- Code-to-name lookup tables
//! - [`text`] -- Game character set decoding

pub mod decoder;
pub mod layout;
pub mod tables;
pub mod text;

pub use decoder::{DomainValue, FieldKind, Gen1Decoder, SchemaDecoder};
pub use layout::{MemoryLayout, PartyRecord, RecordField, Region};

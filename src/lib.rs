//! Reader for the self-describing binary scene file format used by 3D
//! modeling applications. The format embeds its own structure layout table
//! (the schema); this crate decodes that table first and then uses it to
//! materialize every file block into a typed, navigable object graph.

/// Top-level entry point: opens a file or buffer and exposes the decoded
/// object graph.
mod blendfile;
/// Sequential index over the file's blocks.
mod block;
/// Hand-rolled error type shared across the whole decode pipeline.
pub mod error;
/// The fixed 12-byte file prelude.
mod header;
/// Two-pass construction of typed objects from block payloads.
mod materialize;
/// Dynamically-typed materialized objects and their field values.
pub mod object;
/// Endian-aware byte cursor used by every decoder in this crate.
mod reader;
/// The embedded structure-layout table (SDNA) and field-name parsing.
pub mod schema;
/// HTML rendering of the decoded schema.
mod doc;

pub use crate::blendfile::BlendFile;
pub use crate::error::Error;
pub use crate::header::Header;
pub use crate::object::{Object, ObjectRef, Value};
pub use crate::reader::Endian;
pub use crate::schema::Schema;

use std::fs;
use std::path::Path;

use crate::block::{self, BlockHeader};
use crate::doc;
use crate::error::Error;
use crate::header::Header;
use crate::materialize::{self, Materialized};
use crate::object::{Object, ObjectRef};
use crate::schema::Schema;

/// A fully decoded save file: its header, its embedded schema, and every
/// object materialized from its blocks. Built once at open time and
/// immutable afterwards.
#[derive(Debug)]
pub struct BlendFile {
    header: Header,
    schema: Schema,
    block_headers: Vec<BlockHeader>,
    blocks: Vec<Vec<Object>>,
}

impl BlendFile {
    /// Reads `path` in full and decodes it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<BlendFile, Error> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Decodes an in-memory buffer. `data` only needs to live for the
    /// duration of this call; nothing borrows from it afterwards.
    pub fn from_bytes(data: &[u8]) -> Result<BlendFile, Error> {
        let header = Header::parse(data)?;
        let block_headers = block::index_blocks(data, &header)?;

        let mut dna_blocks = block_headers.iter().filter(|b| b.code == "DNA1");
        let dna = dna_blocks.next().ok_or(Error::NoSchema)?;
        if dna_blocks.next().is_some() {
            return Err(Error::NoSchema);
        }
        let payload = &data[dna.payload_offset..dna.payload_offset + dna.size as usize];
        let schema = Schema::decode(payload, header.endian)?;

        let Materialized { blocks, .. } = materialize::materialize(data, &header, &schema, &block_headers)?;

        Ok(BlendFile {
            header,
            schema,
            block_headers,
            blocks,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Every materialized object, in block order and then object order
    /// within each block.
    pub fn all_objects(&self) -> impl Iterator<Item = &Object> {
        self.blocks.iter().flatten()
    }

    /// Objects whose structure type name matches `name`.
    pub fn objects_of_type<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Object> + 'a {
        self.all_objects().filter(move |o| o.type_name() == name)
    }

    /// Dereferences a resolved pointer value back to the object it names.
    pub fn resolve(&self, reference: ObjectRef) -> Option<&Object> {
        self.blocks.get(reference.block).and_then(|b| b.get(reference.index))
    }

    /// Renders the schema (and, in development mode, the block index) as HTML.
    pub fn render_doc(&self, development: bool) -> String {
        doc::render_doc(&self.header, &self.schema, &self.block_headers, development)
    }
}

//! The embedded structure-layout table (SDNA) and the field-name parsing
//! that turns a raw C-style field name into a decode-time descriptor.

mod parser;

use crate::error::Error;
use crate::reader::Endian;

/// The parsed shape of one field's name: array dimensions, the name used to
/// decide pointer-ness during decode, and the key under which the decoded
/// value is stored on the materialized object. Computed once per field when
/// the schema is decoded; the materializer only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Array dimensions, outermost first. Empty for a scalar field.
    pub dims: Vec<usize>,
    /// The field name with the array suffix stripped but any leading `*`s
    /// kept, e.g. `*mtex` for a field declared `*mtex[18]`.
    pub decode_name: String,
    /// The name with leading `*`s stripped too; used as the map key on the
    /// materialized object.
    pub storage_key: String,
}

impl FieldDescriptor {
    pub fn is_pointer(&self) -> bool {
        self.decode_name.starts_with('*')
    }
}

/// Parses a raw schema field name (e.g. `*next`, `mtex[18]`, `*mtex[18]`,
/// `(*cb)()`) into a [`FieldDescriptor`].
pub fn parse_field_name(raw: &str) -> FieldDescriptor {
    let (base, bracket_part) = match raw.find('[') {
        Some(idx) => (&raw[..idx], &raw[idx..]),
        None => (raw, ""),
    };
    let dims = parse_dims(bracket_part);
    let leading_stars = base.chars().take_while(|&c| c == '*').count();
    FieldDescriptor {
        dims,
        decode_name: base.to_string(),
        storage_key: base[leading_stars..].to_string(),
    }
}

fn parse_dims(mut bracket_part: &str) -> Vec<usize> {
    let mut dims = Vec::new();
    while let Some(start) = bracket_part.find('[') {
        let Some(end) = bracket_part[start..].find(']') else {
            break;
        };
        let digits = &bracket_part[start + 1..start + end];
        if let Ok(n) = digits.parse::<usize>() {
            dims.push(n);
        }
        bracket_part = &bracket_part[start + end + 1..];
    }
    dims
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub type_index: u16,
    pub name_index: u16,
    pub descriptor: FieldDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    pub type_index: u16,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone)]
pub struct Schema {
    pub names: Vec<String>,
    pub types: Vec<String>,
    pub type_sizes: Vec<u16>,
    pub structures: Vec<Structure>,
}

impl Schema {
    pub fn decode(payload: &[u8], endian: Endian) -> Result<Schema, Error> {
        parser::decode(payload, endian)
    }

    pub fn type_name(&self, structure: &Structure) -> &str {
        &self.types[structure.type_index as usize]
    }

    pub fn field_name(&self, field: &Field) -> &str {
        &self.names[field.name_index as usize]
    }

    pub fn structure_index_of(&self, type_name: &str) -> Option<usize> {
        self.structures
            .iter()
            .position(|s| self.type_name(s) == type_name)
    }
}

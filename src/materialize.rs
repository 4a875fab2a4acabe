//! Two-pass construction of typed objects from every non-schema block.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::block::BlockHeader;
use crate::error::Error;
use crate::header::Header;
use crate::object::{Object, ObjectRef, Value};
use crate::reader::{until_nul, ByteReader};
use crate::schema::{Field, Schema, Structure};

pub struct Materialized {
    pub blocks: Vec<Vec<Object>>,
    pub address_index: HashMap<u64, usize>,
}

/// Pass 1 allocates empty objects keyed by original memory address; pass 2
/// fills their fields, resolving pointers against the address index built
/// in pass 1. Forward and backward references resolve identically since the
/// index is complete before any field is decoded.
pub fn materialize(
    data: &[u8],
    header: &Header,
    schema: &Schema,
    block_headers: &[BlockHeader],
) -> Result<Materialized, Error> {
    let mut blocks: Vec<Vec<Object>> = Vec::with_capacity(block_headers.len());
    let mut address_index: HashMap<u64, usize> = HashMap::new();

    for (i, bh) in block_headers.iter().enumerate() {
        if bh.code == "DNA1" || bh.count == 0 {
            blocks.push(Vec::new());
            continue;
        }
        let structure = structure_for(schema, bh)?;
        let type_name: Arc<str> = Arc::from(schema.type_name(structure));
        let objects = (0..bh.count)
            .map(|_| Object::new(type_name.clone()))
            .collect();
        blocks.push(objects);
        address_index.insert(bh.old_address, i);
    }

    let mut seen_missing: HashSet<String> = HashSet::new();
    for (i, bh) in block_headers.iter().enumerate() {
        if bh.code == "DNA1" || bh.count == 0 {
            continue;
        }
        let structure = structure_for(schema, bh)?;
        let mut reader = ByteReader::new(data, header.endian);
        reader.seek(bh.payload_offset);
        for obj_idx in 0..bh.count as usize {
            for field in &structure.fields {
                let value = decode_field(
                    &mut reader,
                    header,
                    schema,
                    field,
                    block_headers,
                    &address_index,
                    &mut seen_missing,
                )?;
                blocks[i][obj_idx].set(field.descriptor.storage_key.clone(), value);
            }
        }
    }

    Ok(Materialized {
        blocks,
        address_index,
    })
}

fn structure_for<'s>(schema: &'s Schema, bh: &BlockHeader) -> Result<&'s Structure, Error> {
    schema.structures.get(bh.sdna_index as usize).ok_or_else(|| {
        Error::MalformedSchema(format!(
            "block {:?} references unknown sdna index {}",
            bh.code, bh.sdna_index
        ))
    })
}

fn decode_field(
    reader: &mut ByteReader<'_>,
    header: &Header,
    schema: &Schema,
    field: &Field,
    block_headers: &[BlockHeader],
    address_index: &HashMap<u64, usize>,
    seen_missing: &mut HashSet<String>,
) -> Result<Value, Error> {
    decode_named(
        reader,
        header,
        schema,
        field.type_index,
        &field.descriptor.dims,
        &field.descriptor.decode_name,
        block_headers,
        address_index,
        seen_missing,
    )
}

#[allow(clippy::too_many_arguments)]
fn decode_named(
    reader: &mut ByteReader<'_>,
    header: &Header,
    schema: &Schema,
    type_index: u16,
    dims: &[usize],
    decode_name: &str,
    block_headers: &[BlockHeader],
    address_index: &HashMap<u64, usize>,
    seen_missing: &mut HashSet<String>,
) -> Result<Value, Error> {
    let type_name = schema
        .types
        .get(type_index as usize)
        .map(String::as_str)
        .unwrap_or("");

    // 1. Array names: recurse one dimension at a time; a trailing `char`
    // dimension decodes as a string rather than a list of bytes.
    if let Some((&n, rest)) = dims.split_first() {
        if rest.is_empty() && type_name == "char" {
            let bytes = reader.take(n)?;
            return Ok(Value::Str(String::from_utf8_lossy(until_nul(bytes)).into_owned()));
        }
        let mut items = Vec::with_capacity(n);
        for _ in 0..n {
            items.push(decode_named(
                reader,
                header,
                schema,
                type_index,
                rest,
                decode_name,
                block_headers,
                address_index,
                seen_missing,
            )?);
        }
        return Ok(Value::List(items));
    }

    // 2. Pointer names: always pointer_width bytes, regardless of declared type.
    if decode_name.starts_with('*') {
        let addr = reader.read_uint(header.pointer_width as usize)?;
        return Ok(resolve_pointer(addr, block_headers, address_index));
    }

    // 3. `void` without `*`: function pointer in the writer, no payload.
    if type_name == "void" {
        return Ok(Value::Null);
    }

    // 4. Primitive types.
    match type_name {
        "int" | "short" | "long" | "int64_t" | "uint64_t" => {
            let width = *schema.type_sizes.get(type_index as usize).unwrap_or(&4) as usize;
            Ok(Value::UInt(reader.read_uint(width)?))
        }
        "char" => {
            let byte = reader.read_u8()?;
            Ok(Value::Str((byte as char).to_string()))
        }
        "float" => Ok(Value::Float(reader.read_f32()?)),
        "double" => Ok(Value::Double(reader.read_f64()?)),
        // 5. Compound: recurse into a nested structure, or log once and skip.
        _ => decode_compound(
            reader,
            header,
            schema,
            type_index,
            type_name,
            block_headers,
            address_index,
            seen_missing,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn decode_compound(
    reader: &mut ByteReader<'_>,
    header: &Header,
    schema: &Schema,
    type_index: u16,
    type_name: &str,
    block_headers: &[BlockHeader],
    address_index: &HashMap<u64, usize>,
    seen_missing: &mut HashSet<String>,
) -> Result<Value, Error> {
    match schema.structure_index_of(type_name) {
        Some(idx) => {
            let structure = &schema.structures[idx];
            let mut obj = Object::new(Arc::from(type_name));
            for field in &structure.fields {
                let value = decode_field(
                    reader,
                    header,
                    schema,
                    field,
                    block_headers,
                    address_index,
                    seen_missing,
                )?;
                obj.set(field.descriptor.storage_key.clone(), value);
            }
            Ok(Value::Object(Box::new(obj)))
        }
        None => {
            if seen_missing.insert(type_name.to_string()) {
                log::warn!("unknown nested structure type {type_name:?}, skipping field");
            }
            let width = *schema.type_sizes.get(type_index as usize).unwrap_or(&0) as usize;
            reader.take(width)?;
            Ok(Value::Null)
        }
    }
}

fn resolve_pointer(
    addr: u64,
    block_headers: &[BlockHeader],
    address_index: &HashMap<u64, usize>,
) -> Value {
    if addr == 0 {
        return Value::Null;
    }
    match address_index.get(&addr) {
        Some(&block_idx) => {
            let count = block_headers[block_idx].count as usize;
            if count > 1 {
                let refs = (0..count)
                    .map(|index| ObjectRef { block: block_idx, index })
                    .collect();
                Value::ReferenceList(refs)
            } else {
                Value::Reference(ObjectRef {
                    block: block_idx,
                    index: 0,
                })
            }
        }
        None => Value::Unresolved(addr),
    }
}

use super::{parse_field_name, Field, Schema, Structure};
use crate::error::Error;
use crate::reader::{until_nul, ByteReader, Endian};

/// Decodes the `DNA1` block payload into a [`Schema`], following the strict
/// `SDNA` / `NAME` / `TYPE` / `TLEN` / `STRC` tag sequence. Tags after `NAME`
/// are located by a forward scan so that alignment padding a writer inserts
/// between sections never has to be accounted for explicitly.
pub fn decode(payload: &[u8], endian: Endian) -> Result<Schema, Error> {
    let mut reader = ByteReader::new(payload, endian);

    expect_tag(&mut reader, b"SDNA")?;
    expect_tag(&mut reader, b"NAME")?;
    let name_count = reader.read_u32()?;
    let names = read_string_pool(&mut reader, name_count)?;

    reader.advance_past_tag(b"TYPE")?;
    let type_count = reader.read_u32()?;
    let types = read_string_pool(&mut reader, type_count)?;

    reader.advance_past_tag(b"TLEN")?;
    let mut type_sizes = Vec::with_capacity(type_count as usize);
    for _ in 0..type_count {
        type_sizes.push(reader.read_u16()?);
    }

    reader.advance_past_tag(b"STRC")?;
    let structure_count = reader.read_u32()?;
    let mut structures = Vec::with_capacity(structure_count as usize);
    for _ in 0..structure_count {
        let type_index = reader.read_u16()?;
        let field_count = reader.read_u16()?;
        let mut fields = Vec::with_capacity(field_count as usize);
        for _ in 0..field_count {
            let field_type_index = reader.read_u16()?;
            let field_name_index = reader.read_u16()?;
            let raw_name = names
                .get(field_name_index as usize)
                .ok_or_else(|| Error::MalformedSchema("field name index out of range".into()))?;
            fields.push(Field {
                type_index: field_type_index,
                name_index: field_name_index,
                descriptor: parse_field_name(raw_name),
            });
        }
        structures.push(Structure { type_index, fields });
    }

    Ok(Schema {
        names,
        types,
        type_sizes,
        structures,
    })
}

fn expect_tag(reader: &mut ByteReader<'_>, tag: &[u8; 4]) -> Result<(), Error> {
    let bytes = reader.take(4)?;
    if bytes != tag {
        return Err(Error::MalformedSchema(format!(
            "expected tag {:?}, found {:?}",
            std::str::from_utf8(tag).unwrap_or("?"),
            String::from_utf8_lossy(bytes)
        )));
    }
    Ok(())
}

fn read_string_pool(reader: &mut ByteReader<'_>, count: u32) -> Result<Vec<String>, Error> {
    let mut out = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let remaining = reader.peek(reader.remaining())?;
        let s = until_nul(remaining);
        let consumed = s.len() + 1;
        if consumed > remaining.len() {
            return Err(Error::MalformedSchema("unterminated name string".into()));
        }
        out.push(String::from_utf8_lossy(s).into_owned());
        reader.take(consumed)?;
    }
    Ok(out)
}

//! Renders the decoded schema as human-readable HTML. Pure function of the
//! header and schema (and, in development mode, the block index) — it never
//! touches materialized objects.

use std::fmt::Write as _;

use crate::block::BlockHeader;
use crate::header::Header;
use crate::schema::Schema;

/// Renders an HTML document describing every structure in `schema`. When
/// `development` is true, a second section dumps the raw block index.
pub fn render_doc(header: &Header, schema: &Schema, block_headers: &[BlockHeader], development: bool) -> String {
    let mut out = String::new();
    write_header(&mut out, header);
    write_structures(&mut out, header, schema);
    if development {
        write_block_index(&mut out, block_headers);
    }
    out.push_str("</body></html>\n");
    out
}

fn write_header(out: &mut String, header: &Header) {
    let _ = write!(
        out,
        "<html><body><h1>File version {}</h1><p>pointer width: {} bytes, endianness: {}</p>",
        header.version_str(),
        header.pointer_width,
        if matches!(header.endian, crate::reader::Endian::Little) {
            "little"
        } else {
            "big"
        },
    );
}

fn write_structures(out: &mut String, header: &Header, schema: &Schema) {
    out.push_str("<h2>Structures</h2>");
    for structure in &schema.structures {
        let name = schema.type_name(structure);
        let _ = write!(out, "<h3>{name}</h3><table><tr><th>offset</th><th>field</th><th>size</th></tr>");
        let mut offset = 0usize;
        for field in &structure.fields {
            let field_name = schema.field_name(field);
            let size = field_size(header, schema, field);
            let _ = write!(out, "<tr><td>{offset}</td><td>{field_name}</td><td>{size}</td></tr>");
            offset += size;
        }
        out.push_str("</table>");
    }
}

fn field_size(header: &Header, schema: &Schema, field: &crate::schema::Field) -> usize {
    let element_size = if field.descriptor.is_pointer() {
        header.pointer_width as usize
    } else {
        *schema.type_sizes.get(field.type_index as usize).unwrap_or(&0) as usize
    };
    let count: usize = field.descriptor.dims.iter().product::<usize>().max(1);
    element_size * count
}

fn write_block_index(out: &mut String, block_headers: &[BlockHeader]) {
    out.push_str("<h2>Block index</h2><table><tr><th>code</th><th>sdna</th><th>count</th><th>size</th><th>old address</th></tr>");
    for bh in block_headers {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>0x{:x}</td></tr>",
            bh.code, bh.sdna_index, bh.count, bh.size, bh.old_address
        );
    }
    out.push_str("</table>");
}

use crate::error::Error;
use crate::header::Header;
use crate::reader::ByteReader;

/// Metadata for one file block; the payload itself is read lazily from
/// `payload_offset`/`size` rather than copied in here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub code: String,
    pub size: u32,
    pub old_address: u64,
    pub sdna_index: u32,
    pub count: u32,
    pub payload_offset: usize,
}

impl BlockHeader {
    fn header_len(pointer_width: u8) -> usize {
        16 + pointer_width as usize
    }
}

/// Sequentially reads every block header starting right after the file
/// header, recording payload offsets without copying payload bytes.
pub fn index_blocks(data: &[u8], header: &Header) -> Result<Vec<BlockHeader>, Error> {
    let mut blocks = Vec::new();
    let mut reader: ByteReader<'_> = ByteReader::new(data, header.endian);
    reader.seek(12);

    let header_len = BlockHeader::header_len(header.pointer_width);
    while reader.remaining() >= header_len {
        let code_bytes = reader.take(4)?;
        let code_trimmed = &code_bytes[..code_bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(code_bytes.len())];
        let code = String::from_utf8_lossy(code_trimmed).into_owned();
        let size = reader.read_u32()?;
        let old_address = reader.read_uint(header.pointer_width as usize)?;
        let sdna_index = reader.read_u32()?;
        let count = reader.read_u32()?;
        let payload_offset = reader.position();

        let payload_end = payload_offset
            .checked_add(size as usize)
            .ok_or(Error::TruncatedBlock)?;
        if payload_end > data.len() {
            return Err(Error::TruncatedBlock);
        }
        reader.seek(payload_end);

        blocks.push(BlockHeader {
            code,
            size,
            old_address,
            sdna_index,
            count,
            payload_offset,
        });
    }
    Ok(blocks)
}

use crate::error::Error;
use crate::reader::Endian;

const MAGIC: &[u8; 7] = b"BLENDER";

/// The fixed 12-byte prelude at the start of every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub pointer_width: u8,
    pub endian: Endian,
    /// The 3-byte version tag, verbatim, e.g. `"279"`.
    pub version: [u8; 3],
}

impl Header {
    pub fn parse(data: &[u8]) -> Result<Header, Error> {
        if data.len() < 12 || &data[0..7] != MAGIC {
            return Err(Error::BadMagic);
        }
        let pointer_width = match data[7] {
            b'_' => 4,
            b'-' => 8,
            _ => return Err(Error::BadMagic),
        };
        let endian = match data[8] {
            b'v' => Endian::Little,
            b'V' => Endian::Big,
            _ => return Err(Error::BadMagic),
        };
        let version = [data[9], data[10], data[11]];
        Ok(Header {
            pointer_width,
            endian,
            version,
        })
    }

    pub fn version_str(&self) -> String {
        String::from_utf8_lossy(&self.version).into_owned()
    }
}

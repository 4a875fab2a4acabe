use std::{error, fmt, io};

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    BadMagic,
    TruncatedBlock,
    NoSchema,
    MalformedSchema(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::BadMagic => write!(f, "file does not start with the expected magic header"),
            Error::TruncatedBlock => write!(f, "block header or payload runs past end of file"),
            Error::NoSchema => write!(f, "file does not contain exactly one DNA1 schema block"),
            Error::MalformedSchema(detail) => write!(f, "malformed schema: {detail}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => err.source(),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

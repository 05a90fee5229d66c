use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapiError {
    #[error("invalid CFB header signature: {found:02X?}")]
    BadSignature { found: [u8; 8] },

    #[error("CFB header CLSID is not null")]
    BadClsid,

    #[error("invalid byte-order marker: {found:#06X}")]
    BadByteOrder { found: u16 },

    #[error("unsupported CFB major version: {version}")]
    BadVersion { version: u16 },

    #[error("sector size {size} does not match major version {version}")]
    BadSectorSize { version: u16, size: u32 },

    #[error("invalid sector value {sector:#010X} at chain position {index}")]
    BadChain { sector: u32, index: usize },

    #[error("stream '{name}' not found")]
    NotFound { name: String },

    #[error("malformed property stream at offset {offset}: {reason}")]
    BadProperty { offset: usize, reason: String },

    #[error("compressed RTF header invalid: {reason}")]
    BadRtfHeader { reason: String },

    #[error("compressed RTF CRC mismatch: header {expected:#010X}, computed {actual:#010X}")]
    BadRtfCrc { expected: u32, actual: u32 },

    #[error("unknown RTF compression magic: {magic:02X?}")]
    UnknownRtfCompression { magic: [u8; 4] },

    #[error("truncated RTF token at payload offset {offset}")]
    BadRtfToken { offset: usize },

    #[error("buffer underflow: attempted to read {requested} bytes, but only {available} available")]
    BufferUnderflow { requested: usize, available: usize },

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MapiError>;

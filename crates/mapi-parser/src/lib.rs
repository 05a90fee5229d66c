pub mod cfb;
pub mod mapi;
pub mod reader;
pub mod rtf;

pub use mapi_core::{Attachment, MapiError, Message, Recipient, Result};

use std::io::{Cursor, Read, Seek};

/// Parse an Outlook MSG container from raw bytes
pub fn parse(data: &[u8]) -> Result<Message> {
    let mut cursor = Cursor::new(data);
    parse_reader(&mut cursor)
}

/// Parse an Outlook MSG container from a seekable byte source
pub fn parse_reader<R: Read + Seek>(reader: &mut R) -> Result<Message> {
    let container = cfb::parse_cfb(reader)?;
    mapi::read_message(reader, &container)
}

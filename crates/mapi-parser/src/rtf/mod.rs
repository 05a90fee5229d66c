//! Compressed RTF ([MS-OXRTFCP]) decoder.
//!
//! The wrapper carries a 16-byte header (compressed size, raw size, a
//! four-byte magic and a CRC) followed by the payload. `MELA` payloads
//! are stored verbatim; `LZFu` payloads are LZ-compressed against a
//! 4 KiB ring dictionary seeded with a fixed RTF prelude.

use crate::reader::{crc32, ByteReader};
use mapi_core::{MapiError, Result};

/// Magic of LZ-compressed payloads
const COMPRESSED: [u8; 4] = *b"LZFu";

/// Magic of stored (uncompressed) payloads
const UNCOMPRESSED: [u8; 4] = *b"MELA";

/// Wrapper header size
const HEADER_SIZE: usize = 16;

/// Dictionary prelude defined by [MS-OXRTFCP] 2.1.2.3
const INIT_DICT: &[u8] = b"{\\rtf1\\ansi\\mac\\deff0\\deftab720{\\fonttbl;}\
{\\f0\\fnil \\froman \\fswiss \\fmodern \\fscript \\fdecor MS Sans SerifSymbolArial\
Times New RomanCourier{\\colortbl\\red0\\green0\\blue0\r\n\\par \\pard\\plain\\f0\\fs20\
\\b\\i\\u\\tab\\tx";

/// Seeded length of the dictionary; also the initial write cursor
const INIT_DICT_SIZE: usize = 207;

/// Ring dictionary size
const MAX_DICT_SIZE: usize = 4096;

/// Decompress a compressed-RTF stream, yielding the raw RTF bytes.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < HEADER_SIZE {
        return Err(MapiError::BadRtfHeader {
            reason: format!("{} bytes, need at least {}", data.len(), HEADER_SIZE),
        });
    }

    let mut header = ByteReader::new(&data[..HEADER_SIZE]);
    let comp_size = header.read_u32()? as usize;
    let raw_size = header.read_u32()? as usize;
    let mut comp_type = [0u8; 4];
    header.read_exact(&mut comp_type)?;
    let crc = header.read_u32()?;

    // comp_size counts everything after its own field
    if comp_size < 12 || comp_size + 4 > data.len() {
        return Err(MapiError::BadRtfHeader {
            reason: format!(
                "compressed size {} inconsistent with input of {} bytes",
                comp_size,
                data.len()
            ),
        });
    }
    let payload = &data[HEADER_SIZE..comp_size + 4];

    match comp_type {
        UNCOMPRESSED => {
            if payload.len() < raw_size {
                return Err(MapiError::BadRtfHeader {
                    reason: format!(
                        "raw size {} exceeds stored payload of {} bytes",
                        raw_size,
                        payload.len()
                    ),
                });
            }
            Ok(payload[..raw_size].to_vec())
        }
        COMPRESSED => {
            let actual = crc32(payload);
            if actual != crc {
                return Err(MapiError::BadRtfCrc {
                    expected: crc,
                    actual,
                });
            }
            expand(payload, raw_size)
        }
        magic => Err(MapiError::UnknownRtfCompression { magic }),
    }
}

/// Expand an LZFu payload against the seeded ring dictionary.
fn expand(payload: &[u8], raw_size: usize) -> Result<Vec<u8>> {
    let mut dict = [b' '; MAX_DICT_SIZE];
    dict[..INIT_DICT_SIZE].copy_from_slice(INIT_DICT);
    let mut write_offset = INIT_DICT_SIZE;

    let mut output = Vec::with_capacity(raw_size);
    let mut input = ByteReader::new(payload);

    loop {
        let position = input.position();
        let control = input
            .read_u8()
            .map_err(|_| MapiError::BadRtfToken { offset: position })?;

        // Control bits select literal vs reference, LSB first
        for bit in 0..8 {
            let position = input.position();
            if control & (1 << bit) != 0 {
                let token = input
                    .read_u16_be()
                    .map_err(|_| MapiError::BadRtfToken { offset: position })?;
                let offset = (token >> 4) as usize;
                let length = (token & 0x0F) as usize;

                // A reference to the write cursor ends the stream
                if offset == write_offset {
                    return Ok(output);
                }

                // Copy one byte at a time: a run may read cells written
                // earlier in the same copy
                for step in 0..length + 2 {
                    let byte = dict[(offset + step) % MAX_DICT_SIZE];
                    output.push(byte);
                    dict[write_offset] = byte;
                    write_offset = (write_offset + 1) % MAX_DICT_SIZE;
                }
            } else {
                let literal = input
                    .read_u8()
                    .map_err(|_| MapiError::BadRtfToken { offset: position })?;
                output.push(literal);
                dict[write_offset] = literal;
                write_offset = (write_offset + 1) % MAX_DICT_SIZE;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_length() {
        assert_eq!(INIT_DICT.len(), INIT_DICT_SIZE);
    }

    #[test]
    fn test_stored_payload() {
        let body = b"{\\rtf1 plain}";
        let mut data = Vec::new();
        data.extend_from_slice(&(body.len() as u32 + 12).to_le_bytes());
        data.extend_from_slice(&(body.len() as u32).to_le_bytes());
        data.extend_from_slice(&UNCOMPRESSED);
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(body);

        assert_eq!(decompress(&data).unwrap(), body);
    }

    #[test]
    fn test_header_too_short() {
        let err = decompress(&[0u8; 15]).unwrap_err();
        assert!(matches!(err, MapiError::BadRtfHeader { .. }));
    }

    #[test]
    fn test_unknown_magic() {
        let mut data = vec![0u8; 32];
        data[0..4].copy_from_slice(&20u32.to_le_bytes());
        data[8..12].copy_from_slice(b"XXXX");
        let err = decompress(&data).unwrap_err();
        assert!(matches!(
            err,
            MapiError::UnknownRtfCompression { magic } if &magic == b"XXXX"
        ));
    }
}

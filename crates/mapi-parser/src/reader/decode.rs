//! Slice decoders for the fixed-width values embedded in CFB and MAPI
//! structures. Each function returns `None` when the slice is too short,
//! so absent substreams propagate as absent values.

use encoding_rs::UTF_16LE;

pub fn int8(data: &[u8]) -> Option<i8> {
    data.first().map(|&b| b as i8)
}

pub fn uint8(data: &[u8]) -> Option<u8> {
    data.first().copied()
}

pub fn int16(data: &[u8]) -> Option<i16> {
    Some(i16::from_le_bytes(data.get(..2)?.try_into().ok()?))
}

pub fn uint16(data: &[u8]) -> Option<u16> {
    Some(u16::from_le_bytes(data.get(..2)?.try_into().ok()?))
}

pub fn uint16be(data: &[u8]) -> Option<u16> {
    Some(u16::from_be_bytes(data.get(..2)?.try_into().ok()?))
}

pub fn int32(data: &[u8]) -> Option<i32> {
    Some(i32::from_le_bytes(data.get(..4)?.try_into().ok()?))
}

pub fn uint32(data: &[u8]) -> Option<u32> {
    Some(u32::from_le_bytes(data.get(..4)?.try_into().ok()?))
}

pub fn uint32be(data: &[u8]) -> Option<u32> {
    Some(u32::from_be_bytes(data.get(..4)?.try_into().ok()?))
}

pub fn int64(data: &[u8]) -> Option<i64> {
    Some(i64::from_le_bytes(data.get(..8)?.try_into().ok()?))
}

pub fn uint64(data: &[u8]) -> Option<u64> {
    Some(u64::from_le_bytes(data.get(..8)?.try_into().ok()?))
}

pub fn float32(data: &[u8]) -> Option<f32> {
    Some(f32::from_le_bytes(data.get(..4)?.try_into().ok()?))
}

pub fn float64(data: &[u8]) -> Option<f64> {
    Some(f64::from_le_bytes(data.get(..8)?.try_into().ok()?))
}

/// Decode a UTF-8 byte string; empty input is absent.
pub fn utf8(data: &[u8]) -> Option<String> {
    if data.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(data).into_owned())
}

/// Decode a UTF-16LE byte string without BOM handling; empty input is
/// absent.
pub fn utf16le(data: &[u8]) -> Option<String> {
    if data.is_empty() {
        return None;
    }
    let (decoded, _) = UTF_16LE.decode_without_bom_handling(data);
    Some(decoded.into_owned())
}

/// Format 16 wire bytes as a GUID string. The first three fields are
/// little-endian on the wire and are byte-reversed for display, per the
/// Microsoft convention.
pub fn guid(data: &[u8]) -> Option<String> {
    if data.len() < 16 {
        return None;
    }
    Some(format!(
        "{:02X}{:02X}{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
        data[3], data[2], data[1], data[0],
        data[5], data[4],
        data[7], data[6],
        data[8], data[9],
        data[10], data[11], data[12], data[13], data[14], data[15],
    ))
}

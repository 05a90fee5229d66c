use crate::cfb::CfbContainer;
use crate::reader::{crc32, decode};
use mapi_core::constants::{substream_name, tags, types, MSG_NAMEID};
use mapi_core::{MapiError, Result};
use std::io::{Read, Seek};

/// Lowest dispatch id of a named property
pub const MIN_DISPATCH_ID: u16 = 0x8000;
/// Highest dispatch id of a named property
pub const MAX_DISPATCH_ID: u16 = 0xFFFE;
/// Base of the derived substream ids
pub const BASE_STREAM_ID: u16 = 0x1000;

/// One entry of the named-property entry stream
#[derive(Debug, Clone, Copy)]
pub struct NameEntry {
    /// Numeric id (kind 0) or byte offset into the string stream (kind 1)
    pub id_or_offset: u32,
    /// Bit 0: kind; bits 1..16: GUID index
    pub flags: u16,
    /// Property index
    pub index: u16,
}

impl NameEntry {
    fn kind(&self) -> u16 {
        self.flags & 0x0001
    }

    fn guid_index(&self) -> u16 {
        self.flags >> 1
    }
}

/// The resolved name of a named property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyName {
    /// Numeric dispatch name
    Id(u32),
    /// String dispatch name
    Name(String),
}

/// The named-property map parsed from the `__nameid_version1.0` storage:
/// a GUID array, an entry array indexed by `dispatch_id - 0x8000`, and a
/// stream of length-prefixed UTF-16LE names.
pub struct NamedPropertyMap {
    guids: Vec<[u8; 16]>,
    entries: Vec<NameEntry>,
    strings: Vec<u8>,
}

impl NamedPropertyMap {
    /// Parse the map from the container's `__nameid_version1.0` storage.
    /// Containers without one (no named properties) yield `Ok(None)`.
    pub fn from_container<R: Read + Seek>(
        reader: &mut R,
        container: &CfbContainer,
    ) -> Result<Option<Self>> {
        let root = container.root();
        let storage = match container
            .select_children(root, MSG_NAMEID)
            .into_iter()
            .next()
        {
            Some(storage) => storage,
            None => return Ok(None),
        };

        let guid_stream = container
            .read_child_stream(
                reader,
                storage,
                &substream_name(tags::PID_TAG_NAMEID_STREAM_GUID, types::PTYP_BINARY),
            )?
            .unwrap_or_default();
        let guids = guid_stream
            .chunks_exact(16)
            .filter_map(|chunk| <[u8; 16]>::try_from(chunk).ok())
            .collect();

        let entry_stream = container
            .read_child_stream(
                reader,
                storage,
                &substream_name(tags::PID_TAG_NAMEID_STREAM_ENTRY, types::PTYP_BINARY),
            )?
            .unwrap_or_default();
        let entries = entry_stream
            .chunks_exact(8)
            .filter_map(|chunk| {
                Some(NameEntry {
                    id_or_offset: decode::uint32(&chunk[0..4])?,
                    flags: decode::uint16(&chunk[4..6])?,
                    index: decode::uint16(&chunk[6..8])?,
                })
            })
            .collect();

        let strings = container
            .read_child_stream(
                reader,
                storage,
                &substream_name(tags::PID_TAG_NAMEID_STREAM_STRING, types::PTYP_BINARY),
            )?
            .unwrap_or_default();

        Ok(Some(NamedPropertyMap {
            guids,
            entries,
            strings,
        }))
    }

    /// Number of named-property entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The derived stream id for a dispatch id, in `[0x1000, 0x101E]`.
    pub fn stream_id(&self, dispatch_id: u16) -> Result<u16> {
        let entry = self.entry(dispatch_id)?;
        let shifted = u32::from((entry.guid_index() << 1) | entry.kind());
        let name = match entry.kind() {
            0 => entry.id_or_offset,
            _ => crc32(self.raw_name(entry)?),
        };
        Ok(BASE_STREAM_ID + ((name ^ shifted) % 0x1F) as u16)
    }

    /// The substream name carrying a named property's payload at
    /// property type `ptype`.
    pub fn property_substream_name(&self, dispatch_id: u16, ptype: u16) -> Result<String> {
        Ok(substream_name(self.stream_id(dispatch_id)?, ptype))
    }

    /// The numeric or string name of a dispatch id
    pub fn property_name(&self, dispatch_id: u16) -> Result<PropertyName> {
        let entry = self.entry(dispatch_id)?;
        if entry.kind() == 0 {
            Ok(PropertyName::Id(entry.id_or_offset))
        } else {
            let raw = self.raw_name(entry)?;
            Ok(PropertyName::Name(decode::utf16le(raw).unwrap_or_default()))
        }
    }

    /// The property-set GUID of a dispatch id, formatted
    pub fn property_guid(&self, dispatch_id: u16) -> Result<String> {
        let entry = self.entry(dispatch_id)?;
        let guid_bytes = self
            .guids
            .get(entry.guid_index() as usize)
            .ok_or_else(|| MapiError::NotFound {
                name: format!("named property GUID #{}", entry.guid_index()),
            })?;
        decode::guid(guid_bytes).ok_or_else(|| MapiError::NotFound {
            name: format!("named property GUID #{}", entry.guid_index()),
        })
    }

    fn entry(&self, dispatch_id: u16) -> Result<&NameEntry> {
        if !(MIN_DISPATCH_ID..=MAX_DISPATCH_ID).contains(&dispatch_id) {
            return Err(MapiError::NotFound {
                name: format!("named property {:#06X}", dispatch_id),
            });
        }
        self.entries
            .get((dispatch_id - MIN_DISPATCH_ID) as usize)
            .ok_or_else(|| MapiError::NotFound {
                name: format!("named property {:#06X}", dispatch_id),
            })
    }

    /// Raw UTF-16LE bytes of a string-kind name: a u32 length prefix at
    /// the entry's offset into the string stream
    fn raw_name(&self, entry: &NameEntry) -> Result<&[u8]> {
        let offset = entry.id_or_offset as usize;
        let length = decode::uint32(self.strings.get(offset..).unwrap_or_default()).ok_or(
            MapiError::BadProperty {
                offset,
                reason: "named property string offset out of bounds".to_string(),
            },
        )? as usize;
        self.strings
            .get(offset + 4..offset + 4 + length)
            .ok_or(MapiError::BadProperty {
                offset,
                reason: "named property string truncated".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_with(entries: Vec<NameEntry>, strings: Vec<u8>) -> NamedPropertyMap {
        NamedPropertyMap {
            guids: vec![
                // PS_MAPI {00020328-0000-0000-C000-000000000046}
                [
                    0x28, 0x03, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, 0x00, 0x00, 0x00, 0x00,
                    0x00, 0x00, 0x46,
                ],
                // PS_PUBLIC_STRINGS {00020329-0000-0000-C000-000000000046}
                [
                    0x29, 0x03, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, 0x00, 0x00, 0x00, 0x00,
                    0x00, 0x00, 0x46,
                ],
            ],
            entries,
            strings,
        }
    }

    #[test]
    fn test_numeric_dispatch_id() {
        // kind 0, guid index 2 => flags 0x0004
        let map = map_with(
            vec![
                NameEntry {
                    id_or_offset: 0,
                    flags: 0,
                    index: 0,
                },
                NameEntry {
                    id_or_offset: 0x0000_8554,
                    flags: 0x0004,
                    index: 1,
                },
            ],
            Vec::new(),
        );

        // 0x8554 ^ 4 = 0x8550; 0x8550 % 0x1F = 0x1C
        assert_eq!(map.stream_id(0x8001).unwrap(), 0x101C);
        assert_eq!(
            map.property_substream_name(0x8001, 0x0102).unwrap(),
            "__substg1.0_101C0102"
        );
        assert_eq!(
            map.property_name(0x8001).unwrap(),
            PropertyName::Id(0x8554)
        );
    }

    #[test]
    fn test_string_dispatch_id() {
        // "Keywords" as a length-prefixed UTF-16LE record at offset 0
        let name: Vec<u8> = "Keywords"
            .encode_utf16()
            .flat_map(|unit| unit.to_le_bytes())
            .collect();
        let mut strings = (name.len() as u32).to_le_bytes().to_vec();
        strings.extend_from_slice(&name);

        // kind 1, guid index 1 => flags 0x0003
        let map = map_with(
            vec![NameEntry {
                id_or_offset: 0,
                flags: 0x0003,
                index: 0,
            }],
            strings,
        );

        // crc32("Keywords" UTF-16LE) = 0x2EDA4D3B;
        // 0x2EDA4D3B ^ 3 = 0x2EDA4D38; % 0x1F = 0x0F
        assert_eq!(map.stream_id(0x8000).unwrap(), 0x100F);
        assert_eq!(
            map.property_name(0x8000).unwrap(),
            PropertyName::Name("Keywords".to_string())
        );
    }

    #[test]
    fn test_stream_id_range_invariant() {
        let entries = (0..32u32)
            .map(|i| NameEntry {
                id_or_offset: 0x8000 + i * 37,
                flags: ((i as u16) % 4) << 1,
                index: i as u16,
            })
            .collect();
        let map = map_with(entries, Vec::new());

        for id in 0x8000..0x8020u16 {
            let stream_id = map.stream_id(id).unwrap();
            assert!((0x1000..=0x101E).contains(&stream_id));
        }
    }

    #[test]
    fn test_guid_lookup() {
        let map = map_with(
            vec![NameEntry {
                id_or_offset: 0x8554,
                flags: 0x0002, // kind 0, guid index 1
                index: 0,
            }],
            Vec::new(),
        );
        assert_eq!(
            map.property_guid(0x8000).unwrap(),
            "00020329-0000-0000-C000-000000000046"
        );
    }

    #[test]
    fn test_out_of_range_dispatch_id() {
        let map = map_with(Vec::new(), Vec::new());
        assert!(matches!(
            map.stream_id(0x7FFF).unwrap_err(),
            MapiError::NotFound { .. }
        ));
        assert!(matches!(
            map.stream_id(0x8000).unwrap_err(),
            MapiError::NotFound { .. }
        ));
    }
}

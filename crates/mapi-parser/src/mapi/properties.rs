use crate::cfb::{CfbContainer, DirectoryEntry};
use crate::reader::{decode, ByteReader};
use mapi_core::constants::MSG_PROPS;
use mapi_core::{MapiError, Result};
use std::io::{Read, Seek};

/// Size of one fixed-width property record
pub const PROPERTY_RECORD_SIZE: usize = 16;

/// The kind of storage a property stream belongs to. The stream header
/// size depends on it: 32 bytes for the root, 24 for embedded messages,
/// 8 for recipient and attachment storages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Root,
    Embedded,
    Recipient,
    Attachment,
}

impl StorageKind {
    /// Header length of the `__properties_version1.0` stream
    pub fn header_len(self) -> usize {
        match self {
            StorageKind::Root => 32,
            StorageKind::Embedded => 24,
            StorageKind::Recipient | StorageKind::Attachment => 8,
        }
    }
}

/// A fixed-width property record: type, tag, flags and an 8-byte value.
/// Fixed-width types store the value inline; variable-width types store
/// a reference, with the payload living in a substream named from
/// `(tag, type)`.
#[derive(Debug, Clone)]
pub struct PropertyRecord {
    pub ptype: u16,
    pub tag: u16,
    pub flags: u32,
    pub value: [u8; 8],
}

/// A parsed `__properties_version1.0` stream.
#[derive(Debug)]
pub struct PropertyStream {
    kind: StorageKind,
    header: Vec<u8>,
    records: Vec<PropertyRecord>,
}

impl PropertyStream {
    /// Read and parse the property stream of `storage`. A missing
    /// property stream is an error: every message, recipient and
    /// attachment storage carries one.
    pub fn read<R: Read + Seek>(
        reader: &mut R,
        container: &CfbContainer,
        storage: &DirectoryEntry,
        kind: StorageKind,
    ) -> Result<Self> {
        let data = container
            .read_child_stream(reader, storage, MSG_PROPS)?
            .ok_or_else(|| MapiError::NotFound {
                name: format!("{}/{}", storage.name, MSG_PROPS),
            })?;
        Self::parse(&data, kind)
    }

    /// Parse a property stream from its raw bytes.
    pub fn parse(data: &[u8], kind: StorageKind) -> Result<Self> {
        let header_len = kind.header_len();
        if data.len() < header_len {
            return Err(MapiError::BadProperty {
                offset: data.len(),
                reason: format!(
                    "{:?} storage header needs {} bytes, stream has {}",
                    kind,
                    header_len,
                    data.len()
                ),
            });
        }
        let header = data[..header_len].to_vec();

        let body = &data[header_len..];
        if body.len() % PROPERTY_RECORD_SIZE != 0 {
            return Err(MapiError::BadProperty {
                offset: header_len + body.len() - body.len() % PROPERTY_RECORD_SIZE,
                reason: "truncated property record".to_string(),
            });
        }

        let mut records = Vec::with_capacity(body.len() / PROPERTY_RECORD_SIZE);
        let mut body_reader = ByteReader::new(body);
        while !body_reader.is_eof() {
            let ptype = body_reader.read_u16()?;
            let tag = body_reader.read_u16()?;
            let flags = body_reader.read_u32()?;
            let mut value = [0u8; 8];
            body_reader.read_exact(&mut value)?;
            records.push(PropertyRecord {
                ptype,
                tag,
                flags,
                value,
            });
        }

        Ok(PropertyStream {
            kind,
            header,
            records,
        })
    }

    /// The storage kind this stream was parsed for
    pub fn kind(&self) -> StorageKind {
        self.kind
    }

    /// All records, in stream order
    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    /// Find a record by `(tag, type)`
    pub fn find(&self, tag: u16, ptype: u16) -> Option<&PropertyRecord> {
        self.records
            .iter()
            .find(|r| r.tag == tag && r.ptype == ptype)
    }

    /// Integer32 value with its companion payload-size/reference word
    pub fn int32(&self, tag: u16, ptype: u16) -> Option<(i32, u32)> {
        let record = self.find(tag, ptype)?;
        Some((
            decode::int32(&record.value[0..4])?,
            decode::uint32(&record.value[4..8])?,
        ))
    }

    /// Int64 / FILETIME value
    pub fn int64(&self, tag: u16, ptype: u16) -> Option<i64> {
        decode::int64(&self.find(tag, ptype)?.value)
    }

    /// Boolean value
    pub fn boolean(&self, tag: u16, ptype: u16) -> Option<bool> {
        Some(decode::uint8(&self.find(tag, ptype)?.value[0..1])? != 0)
    }

    /// 32-bit float value
    pub fn float32(&self, tag: u16, ptype: u16) -> Option<f32> {
        decode::float32(&self.find(tag, ptype)?.value[0..4])
    }

    /// 64-bit float value
    pub fn float64(&self, tag: u16, ptype: u16) -> Option<f64> {
        decode::float64(&self.find(tag, ptype)?.value)
    }

    /// Next recipient id (root and embedded storages)
    pub fn next_recipient_id(&self) -> Result<u32> {
        self.header_u32(8)
    }

    /// Next attachment id (root and embedded storages)
    pub fn next_attachment_id(&self) -> Result<u32> {
        self.header_u32(12)
    }

    /// Recipient count (root and embedded storages)
    pub fn num_recipients(&self) -> Result<u32> {
        self.header_u32(16)
    }

    /// Attachment count (root and embedded storages)
    pub fn num_attachments(&self) -> Result<u32> {
        self.header_u32(20)
    }

    fn header_u32(&self, offset: usize) -> Result<u32> {
        decode::uint32(self.header.get(offset..offset + 4).unwrap_or_default()).ok_or(
            MapiError::BadProperty {
                offset,
                reason: format!(
                    "{:?} storage header has no counter at offset {}",
                    self.kind, offset
                ),
            },
        )
    }
}

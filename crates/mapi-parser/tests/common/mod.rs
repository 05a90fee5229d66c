//! Fixture support: a small CFB writer producing version-3 containers,
//! plus helpers assembling MAPI property streams and RTF wrappers.
#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

pub const SECTOR: usize = 512;
pub const MINI_SECTOR: usize = 64;
pub const CUTOFF: usize = 4096;

const FREESECT: u32 = 0xFFFFFFFF;
const ENDOFCHAIN: u32 = 0xFFFFFFFE;
const FATSECT: u32 = 0xFFFFFFFD;

struct Entry {
    name: String,
    object_type: u8,
    parent: Option<usize>,
    data: Vec<u8>,
}

/// Builds a version-3 CFB container (512-byte sectors, 64-byte mini
/// sectors, 4096 cutoff). Streams below the cutoff are packed into the
/// mini stream; storages chain their children as right-sibling lists.
pub struct CfbBuilder {
    entries: Vec<Entry>,
}

impl CfbBuilder {
    pub fn new() -> Self {
        CfbBuilder {
            entries: vec![Entry {
                name: "Root Entry".to_string(),
                object_type: 5,
                parent: None,
                data: Vec::new(),
            }],
        }
    }

    /// Root entry index
    pub fn root(&self) -> usize {
        0
    }

    pub fn add_storage(&mut self, parent: usize, name: &str) -> usize {
        self.entries.push(Entry {
            name: name.to_string(),
            object_type: 1,
            parent: Some(parent),
            data: Vec::new(),
        });
        self.entries.len() - 1
    }

    pub fn add_stream(&mut self, parent: usize, name: &str, data: &[u8]) -> usize {
        self.entries.push(Entry {
            name: name.to_string(),
            object_type: 2,
            parent: Some(parent),
            data: data.to_vec(),
        });
        self.entries.len() - 1
    }

    pub fn build(&self) -> Vec<u8> {
        let n = self.entries.len();

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (i, entry) in self.entries.iter().enumerate() {
            if let Some(parent) = entry.parent {
                children[parent].push(i);
            }
        }

        // Pack sub-cutoff streams into the mini stream
        let mut mini_start = vec![ENDOFCHAIN; n];
        let mut mini_stream: Vec<u8> = Vec::new();
        let mut mini_fat: Vec<u32> = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.object_type == 2 && !entry.data.is_empty() && entry.data.len() < CUTOFF {
                let first = mini_fat.len() as u32;
                mini_start[i] = first;
                let sectors = div_ceil(entry.data.len(), MINI_SECTOR);
                for s in 0..sectors {
                    mini_fat.push(if s + 1 == sectors {
                        ENDOFCHAIN
                    } else {
                        first + s as u32 + 1
                    });
                }
                mini_stream.extend_from_slice(&entry.data);
                mini_stream.resize(mini_fat.len() * MINI_SECTOR, 0);
            }
        }

        // Regular sector layout: directory, mini FAT, mini stream, large
        // streams, then the FAT itself
        let n_dir = div_ceil(n * 128, SECTOR);
        let n_mini_fat = div_ceil(mini_fat.len() * 4, SECTOR);
        let n_mini_stream = div_ceil(mini_stream.len(), SECTOR);

        let mut next = 0u32;
        let dir_start = next;
        next += n_dir as u32;
        let mini_fat_start = next;
        next += n_mini_fat as u32;
        let mini_stream_start = next;
        next += n_mini_stream as u32;

        let mut big_start = vec![ENDOFCHAIN; n];
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.object_type == 2 && entry.data.len() >= CUTOFF {
                big_start[i] = next;
                next += div_ceil(entry.data.len(), SECTOR) as u32;
            }
        }

        let subtotal = next as usize;
        let mut n_fat = 1usize;
        while subtotal + n_fat > n_fat * (SECTOR / 4) {
            n_fat += 1;
        }
        let fat_start = subtotal as u32;

        // FAT cells
        let mut fat = vec![FREESECT; n_fat * (SECTOR / 4)];
        let chain = |fat: &mut Vec<u32>, start: u32, count: usize| {
            for k in 0..count {
                fat[start as usize + k] = if k + 1 == count {
                    ENDOFCHAIN
                } else {
                    start + k as u32 + 1
                };
            }
        };
        chain(&mut fat, dir_start, n_dir);
        if n_mini_fat > 0 {
            chain(&mut fat, mini_fat_start, n_mini_fat);
        }
        if n_mini_stream > 0 {
            chain(&mut fat, mini_stream_start, n_mini_stream);
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if big_start[i] != ENDOFCHAIN {
                chain(&mut fat, big_start[i], div_ceil(entry.data.len(), SECTOR));
            }
        }
        for f in 0..n_fat {
            fat[fat_start as usize + f] = FATSECT;
        }

        // Directory records
        let mut dir = Vec::with_capacity(n_dir * SECTOR);
        for (i, entry) in self.entries.iter().enumerate() {
            let mut record = vec![0u8; 128];
            for (k, unit) in entry.name.encode_utf16().take(31).enumerate() {
                record[k * 2..k * 2 + 2].copy_from_slice(&unit.to_le_bytes());
            }
            let name_len = (entry.name.encode_utf16().count().min(31) as u16 + 1) * 2;
            record[64..66].copy_from_slice(&name_len.to_le_bytes());
            record[66] = entry.object_type;
            record[67] = 1; // black

            let right = entry
                .parent
                .and_then(|parent| {
                    let siblings = &children[parent];
                    let pos = siblings.iter().position(|&c| c == i)?;
                    siblings.get(pos + 1).copied()
                })
                .map_or(FREESECT, |next| next as u32);
            record[68..72].copy_from_slice(&FREESECT.to_le_bytes());
            record[72..76].copy_from_slice(&right.to_le_bytes());

            let child = children[i].first().map_or(FREESECT, |&c| c as u32);
            record[76..80].copy_from_slice(&child.to_le_bytes());

            let (start, size) = match entry.object_type {
                5 => {
                    if mini_stream.is_empty() {
                        (ENDOFCHAIN, 0u64)
                    } else {
                        (mini_stream_start, mini_stream.len() as u64)
                    }
                }
                2 if entry.data.is_empty() => (ENDOFCHAIN, 0),
                2 if entry.data.len() < CUTOFF => (mini_start[i], entry.data.len() as u64),
                2 => (big_start[i], entry.data.len() as u64),
                _ => (0, 0),
            };
            record[116..120].copy_from_slice(&start.to_le_bytes());
            record[120..128].copy_from_slice(&size.to_le_bytes());

            dir.extend_from_slice(&record);
        }
        dir.resize(n_dir * SECTOR, 0);

        // Header
        let mut file = Vec::with_capacity(SECTOR + (subtotal + n_fat) * SECTOR);
        file.extend_from_slice(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]);
        file.extend_from_slice(&[0u8; 16]); // clsid
        file.write_u16::<LittleEndian>(0x003E).unwrap(); // minor
        file.write_u16::<LittleEndian>(3).unwrap(); // major
        file.write_u16::<LittleEndian>(0xFFFE).unwrap(); // byte order
        file.write_u16::<LittleEndian>(9).unwrap(); // sector shift
        file.write_u16::<LittleEndian>(6).unwrap(); // mini sector shift
        file.extend_from_slice(&[0u8; 6]); // reserved
        file.write_u32::<LittleEndian>(0).unwrap(); // total sectors
        file.write_u32::<LittleEndian>(n_fat as u32).unwrap();
        file.write_u32::<LittleEndian>(dir_start).unwrap();
        file.write_u32::<LittleEndian>(0).unwrap(); // transaction
        file.write_u32::<LittleEndian>(CUTOFF as u32).unwrap();
        file.write_u32::<LittleEndian>(if n_mini_fat > 0 {
            mini_fat_start
        } else {
            ENDOFCHAIN
        })
        .unwrap();
        file.write_u32::<LittleEndian>(n_mini_fat as u32).unwrap();
        file.write_u32::<LittleEndian>(ENDOFCHAIN).unwrap(); // first difat
        file.write_u32::<LittleEndian>(0).unwrap(); // difat sectors
        for f in 0..109 {
            let value = if f < n_fat { fat_start + f as u32 } else { FREESECT };
            file.write_u32::<LittleEndian>(value).unwrap();
        }
        assert_eq!(file.len(), SECTOR);

        // Sector contents
        file.extend_from_slice(&dir);
        if n_mini_fat > 0 {
            let mut cells = Vec::with_capacity(n_mini_fat * SECTOR);
            for &cell in &mini_fat {
                cells.write_u32::<LittleEndian>(cell).unwrap();
            }
            while cells.len() < n_mini_fat * SECTOR {
                cells.write_u32::<LittleEndian>(FREESECT).unwrap();
            }
            file.extend_from_slice(&cells);
        }
        if n_mini_stream > 0 {
            let mut padded = mini_stream.clone();
            padded.resize(n_mini_stream * SECTOR, 0);
            file.extend_from_slice(&padded);
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if big_start[i] != ENDOFCHAIN {
                let mut padded = entry.data.clone();
                padded.resize(div_ceil(entry.data.len(), SECTOR) * SECTOR, 0);
                file.extend_from_slice(&padded);
            }
        }
        for &cell in &fat {
            file.write_u32::<LittleEndian>(cell).unwrap();
        }

        file
    }
}

fn div_ceil(value: usize, divisor: usize) -> usize {
    (value + divisor - 1) / divisor
}

/// Encode a string as UTF-16LE without a terminator, the way MAPI
/// string substreams are stored
pub fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|unit| unit.to_le_bytes()).collect()
}

/// Wrap an RTF body in a stored (`MELA`) compressed-RTF envelope
pub fn mela(body: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(body.len() + 16);
    data.write_u32::<LittleEndian>(body.len() as u32 + 12).unwrap();
    data.write_u32::<LittleEndian>(body.len() as u32).unwrap();
    data.extend_from_slice(b"MELA");
    data.write_u32::<LittleEndian>(0).unwrap();
    data.extend_from_slice(body);
    data
}

/// A 16-byte fixed-width property record
pub fn record(ptype: u16, tag: u16, value: [u8; 8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(16);
    data.write_u16::<LittleEndian>(ptype).unwrap();
    data.write_u16::<LittleEndian>(tag).unwrap();
    data.write_u32::<LittleEndian>(6).unwrap(); // readable | writable
    data.extend_from_slice(&value);
    data
}

pub fn record_bool(tag: u16, value: bool) -> Vec<u8> {
    let mut bytes = [0u8; 8];
    bytes[0] = value as u8;
    record(0x000B, tag, bytes)
}

pub fn record_i32(tag: u16, value: i32) -> Vec<u8> {
    let mut bytes = [0u8; 8];
    bytes[0..4].copy_from_slice(&value.to_le_bytes());
    record(0x0003, tag, bytes)
}

pub fn record_time(tag: u16, filetime: i64) -> Vec<u8> {
    record(0x0040, tag, filetime.to_le_bytes())
}

/// Property stream of the root storage: 32-byte header plus records
pub fn root_properties(num_recipients: u32, num_attachments: u32, records: &[Vec<u8>]) -> Vec<u8> {
    let mut data = vec![0u8; 8];
    data.write_u32::<LittleEndian>(num_recipients).unwrap(); // next recipient id
    data.write_u32::<LittleEndian>(num_attachments).unwrap(); // next attachment id
    data.write_u32::<LittleEndian>(num_recipients).unwrap();
    data.write_u32::<LittleEndian>(num_attachments).unwrap();
    data.extend_from_slice(&[0u8; 8]);
    for r in records {
        data.extend_from_slice(r);
    }
    data
}

/// Property stream of an embedded message storage: 24-byte header
pub fn embedded_properties(
    num_recipients: u32,
    num_attachments: u32,
    records: &[Vec<u8>],
) -> Vec<u8> {
    let mut data = vec![0u8; 8];
    data.write_u32::<LittleEndian>(num_recipients).unwrap();
    data.write_u32::<LittleEndian>(num_attachments).unwrap();
    data.write_u32::<LittleEndian>(num_recipients).unwrap();
    data.write_u32::<LittleEndian>(num_attachments).unwrap();
    for r in records {
        data.extend_from_slice(r);
    }
    data
}

/// Property stream of a recipient or attachment storage: 8-byte header
pub fn storage_properties(records: &[Vec<u8>]) -> Vec<u8> {
    let mut data = vec![0u8; 8];
    for r in records {
        data.extend_from_slice(r);
    }
    data
}

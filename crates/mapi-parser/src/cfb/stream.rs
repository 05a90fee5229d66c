use super::directory::DirectoryEntry;
use super::fat::{FatTable, MiniFatTable};
use super::header::CfbHeader;
use mapi_core::{MapiError, Result};
use std::io::{Read, Seek};

/// Read a stream entry's bytes. Streams below the header cutoff live in
/// the mini stream and are followed through the mini FAT; others are
/// followed through the FAT in regular sectors. The sector-aligned chain
/// is truncated to the entry's declared size.
///
/// Zero-sized streams are absent (`Ok(None)`).
pub fn read_entry<R: Read + Seek>(
    reader: &mut R,
    entry: &DirectoryEntry,
    header: &CfbHeader,
    fat: &FatTable,
    mini_fat: Option<&MiniFatTable>,
) -> Result<Option<Vec<u8>>> {
    if !entry.is_stream() {
        return Err(MapiError::BadProperty {
            offset: entry.index as usize,
            reason: format!("entry '{}' is not a stream", entry.name),
        });
    }

    let size = entry.size;
    if size == 0 {
        return Ok(None);
    }

    let mut data = if size < header.mini_stream_cutoff_size as u64 {
        let mini_fat = mini_fat.ok_or(MapiError::BadChain {
            sector: entry.starting_sector,
            index: 0,
        })?;
        mini_fat.read_chain(entry.starting_sector)?
    } else {
        fat.read_chain(reader, entry.starting_sector)?
    };

    if (data.len() as u64) < size {
        return Err(MapiError::BadChain {
            sector: entry.starting_sector,
            index: data.len() / header.sector_size() as usize,
        });
    }

    data.truncate(size as usize);
    Ok(Some(data))
}

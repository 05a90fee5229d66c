use super::constants::*;
use super::directory::{DirectoryEntry, DirectoryTree};
use super::fat::{Difat, FatTable, MiniFatTable};
use super::header::CfbHeader;
use super::stream;
use log::debug;
use mapi_core::Result;
use std::io::{Read, Seek};

/// CFB (Compound File Binary) container: header, allocation tables,
/// directory tree and the materialised mini stream. Built once from a
/// seekable byte source; stream payloads are read on demand.
#[derive(Debug)]
pub struct CfbContainer {
    /// CFB header
    pub header: CfbHeader,
    /// DIFAT array
    pub difat: Difat,
    /// FAT table
    pub fat: FatTable,
    /// Mini FAT table with the mini stream (absent when the container
    /// has no sub-cutoff streams)
    pub mini_fat: Option<MiniFatTable>,
    /// Directory tree
    pub directory: DirectoryTree,
}

impl CfbContainer {
    /// Parse a CFB container from a reader
    pub fn from_reader<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let header = CfbHeader::from_reader(reader)?;
        debug!(
            "CFB version {}.{}, sector size {}, FAT sectors {}",
            header.major_version,
            header.minor_version,
            header.sector_size(),
            header.fat_sectors
        );

        let difat = Difat::from_reader(reader, &header)?;
        let fat = FatTable::from_reader(reader, &header, &difat)?;

        let entries = Self::read_directory_entries(reader, &header, &fat)?;
        let directory = DirectoryTree::new(entries)?;

        let root = directory.root();
        let mini_fat = if header.first_mini_fat_sector != ENDOFCHAIN && header.mini_fat_sectors > 0
        {
            Some(MiniFatTable::from_reader(
                reader,
                &header,
                &fat,
                root.starting_sector,
                root.size,
            )?)
        } else {
            None
        };
        debug!(
            "directory entries: {}, mini stream bytes: {}",
            directory.entries().len(),
            mini_fat.as_ref().map_or(0, |m| m.mini_stream.len())
        );

        Ok(CfbContainer {
            header,
            difat,
            fat,
            mini_fat,
            directory,
        })
    }

    /// Read the directory chain and parse its 128-byte entries,
    /// dropping unallocated slots but keeping original indices.
    fn read_directory_entries<R: Read + Seek>(
        reader: &mut R,
        header: &CfbHeader,
        fat: &FatTable,
    ) -> Result<Vec<DirectoryEntry>> {
        let data = fat.read_chain(reader, header.first_dir_sector)?;

        let mut entries = Vec::new();
        for (index, record) in data.chunks_exact(DIR_ENTRY_SIZE).enumerate() {
            // Object type sits at offset 66 of the record
            if record[66] == 0 {
                continue;
            }
            entries.push(DirectoryEntry::from_bytes(record, index as u32)?);
        }

        Ok(entries)
    }

    /// Get the root storage entry
    pub fn root(&self) -> &DirectoryEntry {
        self.directory.root()
    }

    /// Read a stream entry's bytes; `Ok(None)` for zero-sized streams
    pub fn read_stream<R: Read + Seek>(
        &self,
        reader: &mut R,
        entry: &DirectoryEntry,
    ) -> Result<Option<Vec<u8>>> {
        stream::read_entry(reader, entry, &self.header, &self.fat, self.mini_fat.as_ref())
    }

    /// Find a child of `storage` by exact name
    pub fn find_child<'a>(
        &'a self,
        storage: &DirectoryEntry,
        name: &str,
    ) -> Option<&'a DirectoryEntry> {
        self.directory.find_child(storage, name)
    }

    /// Children of `storage` whose name starts with `prefix`, ascending
    pub fn select_children<'a>(
        &'a self,
        storage: &DirectoryEntry,
        prefix: &str,
    ) -> Vec<&'a DirectoryEntry> {
        self.directory.select_children(storage, prefix)
    }

    /// Read the named child stream of `storage`; absent child or
    /// zero-sized stream is `Ok(None)`
    pub fn read_child_stream<R: Read + Seek>(
        &self,
        reader: &mut R,
        storage: &DirectoryEntry,
        name: &str,
    ) -> Result<Option<Vec<u8>>> {
        match self.find_child(storage, name) {
            Some(entry) => self.read_stream(reader, entry),
            None => Ok(None),
        }
    }
}

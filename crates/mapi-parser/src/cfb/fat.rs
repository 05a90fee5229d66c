use super::constants::*;
use super::header::CfbHeader;
use byteorder::{LittleEndian, ReadBytesExt};
use mapi_core::{MapiError, Result};
use std::io::{Read, Seek, SeekFrom};

/// Follow a sector chain through `entries` starting at `start` until
/// `ENDOFCHAIN`. Reserved values mid-chain, indices beyond the table,
/// and chains longer than the table (a cycle) are corruption.
pub(crate) fn walk_chain(entries: &[u32], start: u32) -> Result<Vec<u32>> {
    let mut chain = Vec::new();
    let mut current = start;

    while current != ENDOFCHAIN {
        if current > MAXREGSECT || current as usize >= entries.len() || chain.len() >= entries.len()
        {
            return Err(MapiError::BadChain {
                sector: current,
                index: chain.len(),
            });
        }
        chain.push(current);
        current = entries[current as usize];
    }

    Ok(chain)
}

/// The DIFAT: the ordered list of sector numbers locating the FAT
/// sectors. The first 109 entries live in the header; the rest are
/// chained through dedicated DIFAT sectors.
#[derive(Debug)]
pub struct Difat {
    /// DIFAT entries, including the header's FREESECT padding
    pub entries: Vec<u32>,
}

impl Difat {
    /// Assemble the DIFAT from the header array and the DIFAT sector
    /// chain headed by `first_difat_sector`.
    pub fn from_reader<R: Read + Seek>(reader: &mut R, header: &CfbHeader) -> Result<Self> {
        let sector_size = header.sector_size() as usize;
        let entries_per_sector = sector_size / 4;

        let mut entries = header.difat.to_vec();

        let mut current = header.first_difat_sector;
        let mut sectors_read = 0usize;
        while current != ENDOFCHAIN {
            if current > MAXREGSECT || sectors_read >= header.difat_sectors as usize {
                return Err(MapiError::BadChain {
                    sector: current,
                    index: sectors_read,
                });
            }

            let offset = (current as u64 + 1) * sector_size as u64;
            reader.seek(SeekFrom::Start(offset))?;

            // The last cell of each DIFAT sector is the next-sector link
            for _ in 0..entries_per_sector - 1 {
                entries.push(reader.read_u32::<LittleEndian>()?);
            }
            current = reader.read_u32::<LittleEndian>()?;
            sectors_read += 1;
        }

        Ok(Difat { entries })
    }

    /// Number of entries naming an actual FAT sector
    pub fn fat_sector_count(&self) -> usize {
        self.entries.iter().filter(|&&e| e <= MAXREGSECT).count()
    }
}

/// FAT (File Allocation Table): sector-chain cells indexed by regular
/// sector number.
#[derive(Debug)]
pub struct FatTable {
    /// FAT entries
    pub entries: Vec<u32>,
    /// Sector size
    pub sector_size: u32,
}

impl FatTable {
    /// Read the FAT sectors named by the DIFAT, in DIFAT order.
    pub fn from_reader<R: Read + Seek>(
        reader: &mut R,
        header: &CfbHeader,
        difat: &Difat,
    ) -> Result<Self> {
        let sector_size = header.sector_size();
        let entries_per_sector = sector_size / 4;

        let mut entries = Vec::new();
        for &fat_sector in &difat.entries {
            if fat_sector > MAXREGSECT {
                continue;
            }

            let offset = (fat_sector as u64 + 1) * sector_size as u64;
            reader.seek(SeekFrom::Start(offset))?;

            for _ in 0..entries_per_sector {
                entries.push(reader.read_u32::<LittleEndian>()?);
            }
        }

        Ok(FatTable {
            entries,
            sector_size,
        })
    }

    /// Get all sectors in a chain starting from the given sector
    pub fn chain(&self, start_sector: u32) -> Result<Vec<u32>> {
        walk_chain(&self.entries, start_sector)
    }

    /// Read the bytes of a sector chain
    pub fn read_chain<R: Read + Seek>(&self, reader: &mut R, start_sector: u32) -> Result<Vec<u8>> {
        let chain = self.chain(start_sector)?;
        let mut data = Vec::with_capacity(chain.len() * self.sector_size as usize);

        for sector in chain {
            let offset = (sector as u64 + 1) * self.sector_size as u64;
            reader.seek(SeekFrom::Start(offset))?;

            let mut sector_data = vec![0u8; self.sector_size as usize];
            reader.read_exact(&mut sector_data)?;
            data.extend_from_slice(&sector_data);
        }

        Ok(data)
    }
}

/// Mini FAT for streams below the cutoff, together with the
/// materialised mini stream (the root entry's byte content).
#[derive(Debug)]
pub struct MiniFatTable {
    /// Mini FAT entries, indexed by mini sector number
    pub entries: Vec<u32>,
    /// Mini stream data
    pub mini_stream: Vec<u8>,
    /// Mini sector size
    mini_sector_size: u32,
}

impl MiniFatTable {
    /// Read the mini FAT chain through the FAT, and the mini stream from
    /// the root entry's FAT chain truncated to the root's declared size.
    pub fn from_reader<R: Read + Seek>(
        reader: &mut R,
        header: &CfbHeader,
        fat: &FatTable,
        mini_stream_start: u32,
        mini_stream_size: u64,
    ) -> Result<Self> {
        let mini_sector_size = header.mini_sector_size();
        let entries_per_sector = header.sector_size() / 4;

        let mut entries = Vec::new();
        if header.first_mini_fat_sector != ENDOFCHAIN {
            let mini_fat_chain = fat.chain(header.first_mini_fat_sector)?;

            for sector in mini_fat_chain {
                let offset = (sector as u64 + 1) * header.sector_size() as u64;
                reader.seek(SeekFrom::Start(offset))?;

                for _ in 0..entries_per_sector {
                    entries.push(reader.read_u32::<LittleEndian>()?);
                }
            }
        }

        let mut mini_stream = if mini_stream_size > 0 && mini_stream_start != ENDOFCHAIN {
            fat.read_chain(reader, mini_stream_start)?
        } else {
            Vec::new()
        };
        mini_stream.truncate(mini_stream_size as usize);

        Ok(MiniFatTable {
            entries,
            mini_stream,
            mini_sector_size,
        })
    }

    /// Get all mini sectors in a chain
    pub fn chain(&self, start_mini_sector: u32) -> Result<Vec<u32>> {
        walk_chain(&self.entries, start_mini_sector)
    }

    /// Read the bytes of a mini sector chain out of the mini stream
    pub fn read_chain(&self, start_mini_sector: u32) -> Result<Vec<u8>> {
        let chain = self.chain(start_mini_sector)?;
        let mut data = Vec::with_capacity(chain.len() * self.mini_sector_size as usize);

        for (position, mini_sector) in chain.into_iter().enumerate() {
            let offset = (mini_sector * self.mini_sector_size) as usize;
            let end = offset + self.mini_sector_size as usize;

            if end > self.mini_stream.len() {
                return Err(MapiError::BadChain {
                    sector: mini_sector,
                    index: position,
                });
            }

            data.extend_from_slice(&self.mini_stream[offset..end]);
        }

        Ok(data)
    }
}

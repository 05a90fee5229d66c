use super::constants::*;
use byteorder::{LittleEndian, ReadBytesExt};
use mapi_core::{MapiError, Result};
use std::io::{Read, Seek, SeekFrom};

/// CFB header structure (first 512 bytes of the file)
#[derive(Debug, Clone)]
pub struct CfbHeader {
    /// Signature (0xD0CF11E0A1B11AE1)
    pub signature: [u8; 8],
    /// CLSID (16 bytes, must be zeros)
    pub clsid: [u8; 16],
    /// Minor version
    pub minor_version: u16,
    /// Major version (3 for 512-byte sectors, 4 for 4096-byte sectors)
    pub major_version: u16,
    /// Byte order (0xFFFE = little-endian)
    pub byte_order: u16,
    /// Sector size power (9 = 512 bytes, 12 = 4096 bytes)
    pub sector_shift: u16,
    /// Mini sector size power (typically 6 = 64 bytes)
    pub mini_sector_shift: u16,
    /// Total sectors (0 for version 3)
    pub total_sectors: u32,
    /// Number of FAT sectors
    pub fat_sectors: u32,
    /// First directory sector
    pub first_dir_sector: u32,
    /// Transaction signature
    pub transaction_signature: u32,
    /// Mini stream cutoff size (typically 4096)
    pub mini_stream_cutoff_size: u32,
    /// First mini FAT sector
    pub first_mini_fat_sector: u32,
    /// Number of mini FAT sectors
    pub mini_fat_sectors: u32,
    /// First DIFAT sector
    pub first_difat_sector: u32,
    /// Number of DIFAT sectors
    pub difat_sectors: u32,
    /// First 109 FAT sector positions (DIFAT array)
    pub difat: [u32; 109],
}

impl CfbHeader {
    /// Parse and validate the CFB header from a reader
    pub fn from_reader<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        reader.seek(SeekFrom::Start(0))?;

        let mut signature = [0u8; 8];
        reader.read_exact(&mut signature)?;
        if signature != CFB_SIGNATURE {
            return Err(MapiError::BadSignature { found: signature });
        }

        let mut clsid = [0u8; 16];
        reader.read_exact(&mut clsid)?;
        if clsid != [0u8; 16] {
            return Err(MapiError::BadClsid);
        }

        let minor_version = reader.read_u16::<LittleEndian>()?;
        let major_version = reader.read_u16::<LittleEndian>()?;

        let byte_order = reader.read_u16::<LittleEndian>()?;
        if byte_order != 0xFFFE {
            return Err(MapiError::BadByteOrder { found: byte_order });
        }

        if !matches!(major_version, 3 | 4) {
            return Err(MapiError::BadVersion {
                version: major_version,
            });
        }

        let sector_shift = reader.read_u16::<LittleEndian>()?;
        let mini_sector_shift = reader.read_u16::<LittleEndian>()?;

        let sector_size = 1u32 << sector_shift;
        let expected = match major_version {
            3 => SECTOR_SIZE_512,
            _ => SECTOR_SIZE_4096,
        };
        if sector_size != expected {
            return Err(MapiError::BadSectorSize {
                version: major_version,
                size: sector_size,
            });
        }

        // Reserved bytes
        let mut reserved = [0u8; 6];
        reader.read_exact(&mut reserved)?;

        let total_sectors = reader.read_u32::<LittleEndian>()?;
        let fat_sectors = reader.read_u32::<LittleEndian>()?;
        let first_dir_sector = reader.read_u32::<LittleEndian>()?;
        let transaction_signature = reader.read_u32::<LittleEndian>()?;
        let mini_stream_cutoff_size = reader.read_u32::<LittleEndian>()?;
        let first_mini_fat_sector = reader.read_u32::<LittleEndian>()?;
        let mini_fat_sectors = reader.read_u32::<LittleEndian>()?;
        let first_difat_sector = reader.read_u32::<LittleEndian>()?;
        let difat_sectors = reader.read_u32::<LittleEndian>()?;

        let mut difat = [0u32; 109];
        for entry in difat.iter_mut() {
            *entry = reader.read_u32::<LittleEndian>()?;
        }

        Ok(CfbHeader {
            signature,
            clsid,
            minor_version,
            major_version,
            byte_order,
            sector_shift,
            mini_sector_shift,
            total_sectors,
            fat_sectors,
            first_dir_sector,
            transaction_signature,
            mini_stream_cutoff_size,
            first_mini_fat_sector,
            mini_fat_sectors,
            first_difat_sector,
            difat_sectors,
            difat,
        })
    }

    /// Get the sector size in bytes
    pub fn sector_size(&self) -> u32 {
        1 << self.sector_shift
    }

    /// Get the mini sector size in bytes
    pub fn mini_sector_size(&self) -> u32 {
        1 << self.mini_sector_shift
    }
}

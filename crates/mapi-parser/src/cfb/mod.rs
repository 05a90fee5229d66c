pub mod container;
pub mod directory;
pub mod fat;
pub mod header;
pub mod stream;

pub use container::CfbContainer;
pub use directory::{DirectoryEntry, DirectoryTree, ObjectType};
pub use fat::{Difat, FatTable, MiniFatTable};
pub use header::CfbHeader;

use mapi_core::Result;
use std::io::{Read, Seek};

/// CFB (Compound File Binary) format constants
pub mod constants {
    /// CFB signature bytes
    pub const CFB_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

    /// Header size, independent of the sector size
    pub const HEADER_SIZE: usize = 512;

    /// Sector size for major version 3
    pub const SECTOR_SIZE_512: u32 = 512;

    /// Sector size for major version 4
    pub const SECTOR_SIZE_4096: u32 = 4096;

    /// Free (unallocated) sector marker
    pub const FREESECT: u32 = 0xFFFFFFFF;

    /// End of chain marker
    pub const ENDOFCHAIN: u32 = 0xFFFFFFFE;

    /// FAT sector marker
    pub const FATSECT: u32 = 0xFFFFFFFD;

    /// DIFAT sector marker
    pub const DIFSECT: u32 = 0xFFFFFFFC;

    /// Maximum regular sector number
    pub const MAXREGSECT: u32 = 0xFFFFFFFA;

    /// Directory entry size
    pub const DIR_ENTRY_SIZE: usize = 128;
}

/// Parse a CFB container from a reader
pub fn parse_cfb<R: Read + Seek>(reader: &mut R) -> Result<CfbContainer> {
    container::CfbContainer::from_reader(reader)
}

/// Parse a CFB container from bytes
pub fn parse_cfb_bytes(data: &[u8]) -> Result<CfbContainer> {
    use std::io::Cursor;
    let mut cursor = Cursor::new(data);
    parse_cfb(&mut cursor)
}

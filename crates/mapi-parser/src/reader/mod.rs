pub mod byte_reader;
pub mod crc32;
pub mod decode;

pub use byte_reader::ByteReader;
pub use crc32::crc32;

use super::constants::*;
use crate::reader::decode;
use byteorder::{LittleEndian, ReadBytesExt};
use mapi_core::{MapiError, Result};
use std::collections::HashSet;
use std::io::Read;

/// Object type for directory entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    /// Unknown or unallocated
    Unknown = 0,
    /// Storage object (directory)
    Storage = 1,
    /// Stream object (file)
    Stream = 2,
    /// Root storage
    RootStorage = 5,
}

impl From<u8> for ObjectType {
    fn from(value: u8) -> Self {
        match value {
            1 => ObjectType::Storage,
            2 => ObjectType::Stream,
            5 => ObjectType::RootStorage,
            _ => ObjectType::Unknown,
        }
    }
}

/// Color flag for directory tree nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFlag {
    Red = 0,
    Black = 1,
}

impl From<u8> for ColorFlag {
    fn from(value: u8) -> Self {
        match value {
            0 => ColorFlag::Red,
            _ => ColorFlag::Black,
        }
    }
}

/// Directory entry structure (128 bytes)
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Index of the entry in the flattened directory array
    pub index: u32,
    /// Entry name (UTF-16LE on the wire, up to 32 characters)
    pub name: String,
    /// Name length in bytes, including the terminating null pair
    pub name_len: u16,
    /// Object type
    pub object_type: ObjectType,
    /// Color flag (red-black sibling tree)
    pub color_flag: ColorFlag,
    /// Left sibling entry index
    pub left_sibling: u32,
    /// Right sibling entry index
    pub right_sibling: u32,
    /// Child entry index (storage objects)
    pub child: u32,
    /// CLSID (16 bytes)
    pub clsid: [u8; 16],
    /// State bits
    pub state_bits: u32,
    /// Creation time (FILETIME)
    pub creation_time: u64,
    /// Modified time (FILETIME)
    pub modified_time: u64,
    /// Starting sector (streams; mini-stream head for the root)
    pub starting_sector: u32,
    /// Stream size in bytes
    pub size: u64,
    /// Indices of child entries (storages only), ascending
    pub children: Vec<u32>,
}

impl DirectoryEntry {
    /// Parse a directory entry from a 128-byte record
    pub fn from_bytes(data: &[u8], index: u32) -> Result<Self> {
        if data.len() < DIR_ENTRY_SIZE {
            return Err(MapiError::BufferUnderflow {
                requested: DIR_ENTRY_SIZE,
                available: data.len(),
            });
        }

        let mut cursor = std::io::Cursor::new(data);

        let mut name_bytes = [0u8; 64];
        cursor.read_exact(&mut name_bytes)?;

        let name_len = cursor.read_u16::<LittleEndian>()?;
        if name_len as usize > 64 {
            return Err(MapiError::EncodingError(format!(
                "directory entry {} name length {} out of range",
                index, name_len
            )));
        }

        // The terminating null pair is excluded from the name
        let name = if name_len >= 2 {
            decode::utf16le(&name_bytes[..name_len as usize - 2]).unwrap_or_default()
        } else {
            String::new()
        };

        let object_type = ObjectType::from(cursor.read_u8()?);
        let color_flag = ColorFlag::from(cursor.read_u8()?);

        let left_sibling = cursor.read_u32::<LittleEndian>()?;
        let right_sibling = cursor.read_u32::<LittleEndian>()?;
        let child = cursor.read_u32::<LittleEndian>()?;

        let mut clsid = [0u8; 16];
        cursor.read_exact(&mut clsid)?;

        let state_bits = cursor.read_u32::<LittleEndian>()?;
        let creation_time = cursor.read_u64::<LittleEndian>()?;
        let modified_time = cursor.read_u64::<LittleEndian>()?;
        let starting_sector = cursor.read_u32::<LittleEndian>()?;
        let size = cursor.read_u64::<LittleEndian>()?;

        Ok(DirectoryEntry {
            index,
            name,
            name_len,
            object_type,
            color_flag,
            left_sibling,
            right_sibling,
            child,
            clsid,
            state_bits,
            creation_time,
            modified_time,
            starting_sector,
            size,
            children: Vec::new(),
        })
    }

    /// Check if this entry is allocated
    pub fn is_allocated(&self) -> bool {
        self.object_type != ObjectType::Unknown
    }

    /// Check if this is the root entry
    pub fn is_root(&self) -> bool {
        self.object_type == ObjectType::RootStorage
    }

    /// Check if this is a storage (directory)
    pub fn is_storage(&self) -> bool {
        matches!(
            self.object_type,
            ObjectType::Storage | ObjectType::RootStorage
        )
    }

    /// Check if this is a stream (file)
    pub fn is_stream(&self) -> bool {
        self.object_type == ObjectType::Stream
    }
}

/// The CFB directory: a flat, index-addressed entry array whose storages
/// reference their children as red-black sibling trees of entry indices.
#[derive(Debug)]
pub struct DirectoryTree {
    entries: Vec<DirectoryEntry>,
}

impl DirectoryTree {
    /// Build the tree from allocated entries and materialise every
    /// storage's child set.
    pub fn new(entries: Vec<DirectoryEntry>) -> Result<Self> {
        let mut tree = DirectoryTree { entries };

        match tree.entries.first() {
            Some(root) if root.is_root() => {}
            _ => {
                return Err(MapiError::NotFound {
                    name: "Root Entry".to_string(),
                })
            }
        }

        let storages: Vec<u32> = tree
            .entries
            .iter()
            .filter(|e| e.is_storage())
            .map(|e| e.index)
            .collect();

        for id in storages {
            let children = tree.collect_children(id)?;
            if let Some(pos) = tree.position(id) {
                tree.entries[pos].children = children;
            }
        }

        Ok(tree)
    }

    /// Collect the entry indices reachable from a storage's child link by
    /// left/right sibling traversal, sorted ascending. Iterative walk
    /// with an explicit stack; a visited set guards against sibling
    /// cycles in corrupt files.
    fn collect_children(&self, storage_id: u32) -> Result<Vec<u32>> {
        let storage = self.entry(storage_id).ok_or(MapiError::BadChain {
            sector: storage_id,
            index: 0,
        })?;

        let mut children = Vec::new();
        if storage.child > MAXREGSECT {
            return Ok(children);
        }

        let mut visited = HashSet::new();
        let mut stack = vec![storage.child];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            children.push(id);

            let node = self.entry(id).ok_or(MapiError::BadChain {
                sector: id,
                index: children.len(),
            })?;
            if node.left_sibling != FREESECT {
                stack.push(node.left_sibling);
            }
            if node.right_sibling != FREESECT {
                stack.push(node.right_sibling);
            }
        }

        children.sort_unstable();
        Ok(children)
    }

    /// Get an entry by its directory index
    pub fn entry(&self, id: u32) -> Option<&DirectoryEntry> {
        self.position(id).map(|pos| &self.entries[pos])
    }

    fn position(&self, id: u32) -> Option<usize> {
        // Entries keep their original index and stay in ascending order
        // after unallocated slots are dropped.
        self.entries.binary_search_by_key(&id, |e| e.index).ok()
    }

    /// Get the root storage entry
    pub fn root(&self) -> &DirectoryEntry {
        &self.entries[0]
    }

    /// All entries, in directory order
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Children of a storage, in ascending index order
    pub fn children_of<'a>(&'a self, storage: &DirectoryEntry) -> Vec<&'a DirectoryEntry> {
        storage
            .children
            .iter()
            .filter_map(|&id| self.entry(id))
            .collect()
    }

    /// Find a child of `storage` by exact name
    pub fn find_child<'a>(
        &'a self,
        storage: &DirectoryEntry,
        name: &str,
    ) -> Option<&'a DirectoryEntry> {
        self.children_of(storage).into_iter().find(|e| e.name == name)
    }

    /// Select the children of `storage` whose name starts with `prefix`,
    /// in ascending index order
    pub fn select_children<'a>(
        &'a self,
        storage: &DirectoryEntry,
        prefix: &str,
    ) -> Vec<&'a DirectoryEntry> {
        self.children_of(storage)
            .into_iter()
            .filter(|e| e.name.starts_with(prefix))
            .collect()
    }
}

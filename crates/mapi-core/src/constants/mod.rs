pub mod tags;
pub mod types;

/// Name of the root directory entry of a MSG container.
pub const MSG_ROOT: &str = "Root Entry";
/// Storage holding the named-property mapping streams.
pub const MSG_NAMEID: &str = "__nameid_version1.0";
/// Prefix of per-recipient storages.
pub const MSG_RECIP: &str = "__recip_version1.0";
/// Prefix of per-attachment storages.
pub const MSG_ATTACH: &str = "__attach_version1.0";
/// Prefix of property substreams; the suffix encodes (tag, type).
pub const MSG_SUBSTG: &str = "__substg1.0_";
/// Fixed-width property stream of a storage.
pub const MSG_PROPS: &str = "__properties_version1.0";
/// Substream name of an embedded message object
/// (PidTagAttachDataObject, PtypObject).
pub const MSG_EMBEDDED: &str = "__substg1.0_3701000D";

/// MAPI object types (PidTagObjectType values).
pub mod object_types {
    pub const STORE_OBJECT: i32 = 0x0000_0001;
    pub const ADDRESS_BOOK_OBJECT: i32 = 0x0000_0002;
    pub const ADDRESS_BOOK_CONTAINER: i32 = 0x0000_0004;
    pub const MESSAGE_OBJECT: i32 = 0x0000_0005;
    pub const MAIL_USER: i32 = 0x0000_0006;
    pub const ATTACHMENT_OBJECT: i32 = 0x0000_0007;
    pub const DISTRIBUTION_LIST: i32 = 0x0000_0008;
}

/// Builds the substream name for a `(tag, type)` pair, e.g.
/// `__substg1.0_0037001F` for the subject string.
pub fn substream_name(tag: u16, ptype: u16) -> String {
    format!("{}{:04X}{:04X}", MSG_SUBSTG, tag, ptype)
}

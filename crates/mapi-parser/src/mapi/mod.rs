pub mod message;
pub mod named_properties;
pub mod properties;

pub use message::read_message;
pub use named_properties::{NamedPropertyMap, PropertyName};
pub use properties::{PropertyRecord, PropertyStream, StorageKind};

pub mod constants;
pub mod errors;
pub mod models;

// Re-export commonly used items
pub use errors::{MapiError, Result};
pub use models::{filetime_to_datetime, Attachment, Message, Recipient};

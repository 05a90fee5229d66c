pub mod message;
pub mod time;

pub use message::{Attachment, Message, Recipient};
pub use time::filetime_to_datetime;

//! MAPI property tags ([MS-OXPROPS]) used by the message reader.

pub const PID_TAG_IMPORTANCE: u16 = 0x0017;
pub const PID_TAG_MESSAGE_CLASS: u16 = 0x001A;
pub const PID_TAG_RECEIPT_TIME: u16 = 0x002A;
pub const PID_TAG_SENSITIVITY: u16 = 0x0036;
pub const PID_TAG_SUBJECT: u16 = 0x0037;
pub const PID_TAG_CLIENT_SUBMIT_TIME: u16 = 0x0039;
pub const PID_TAG_SENT_REPRESENTING_NAME: u16 = 0x0042;
pub const PID_TAG_ORIGINAL_SENDER_NAME: u16 = 0x005A;
pub const PID_TAG_SENT_REPRESENTING_EMAIL_ADDRESS: u16 = 0x0065;
pub const PID_TAG_CONVERSATION_TOPIC: u16 = 0x0070;
pub const PID_TAG_TRANSPORT_MESSAGE_HEADERS: u16 = 0x007D;
pub const PID_TAG_SENDER_NAME: u16 = 0x0C1A;
pub const PID_TAG_SENDER_EMAIL_ADDRESS: u16 = 0x0C1F;
pub const PID_TAG_DISPLAY_BCC: u16 = 0x0E02;
pub const PID_TAG_DISPLAY_CC: u16 = 0x0E03;
pub const PID_TAG_DISPLAY_TO: u16 = 0x0E04;
pub const PID_TAG_MESSAGE_DELIVERY_TIME: u16 = 0x0E06;
pub const PID_TAG_MESSAGE_FLAGS: u16 = 0x0E07;
pub const PID_TAG_MESSAGE_SIZE: u16 = 0x0E08;
pub const PID_TAG_HAS_ATTACHMENTS: u16 = 0x0E1B;
pub const PID_TAG_RTF_IN_SYNC: u16 = 0x0E1F;
pub const PID_TAG_ATTACH_SIZE: u16 = 0x0E20;
pub const PID_TAG_ATTACH_NUMBER: u16 = 0x0E21;
pub const PID_TAG_OBJECT_TYPE: u16 = 0x0FFE;
pub const PID_TAG_BODY: u16 = 0x1000;
pub const PID_TAG_RTF_COMPRESSED: u16 = 0x1009;
pub const PID_TAG_BODY_HTML: u16 = 0x1013;
pub const PID_TAG_BODY_CONTENT_LOCATION: u16 = 0x1014;
pub const PID_TAG_BODY_CONTENT_ID: u16 = 0x1015;
pub const PID_TAG_INTERNET_MESSAGE_ID: u16 = 0x1035;
pub const PID_TAG_DISPLAY_NAME: u16 = 0x3001;
pub const PID_TAG_ADDRESS_TYPE: u16 = 0x3002;
pub const PID_TAG_EMAIL_ADDRESS: u16 = 0x3003;
pub const PID_TAG_CREATION_TIME: u16 = 0x3007;
pub const PID_TAG_LAST_MODIFICATION_TIME: u16 = 0x3008;
pub const PID_TAG_ATTACH_DATA_BINARY: u16 = 0x3701;
pub const PID_TAG_ATTACH_DATA_OBJECT: u16 = 0x3701;
pub const PID_TAG_ATTACH_EXTENSION: u16 = 0x3703;
pub const PID_TAG_ATTACH_FILENAME: u16 = 0x3704;
pub const PID_TAG_ATTACH_METHOD: u16 = 0x3705;
pub const PID_TAG_ATTACH_LONG_FILENAME: u16 = 0x3707;
pub const PID_TAG_ATTACH_MIME_TAG: u16 = 0x370E;
pub const PID_TAG_ATTACH_CONTENT_ID: u16 = 0x3712;
pub const PID_TAG_SMTP_ADDRESS: u16 = 0x39FE;
pub const PID_TAG_SENDER_SMTP_ADDRESS: u16 = 0x5D01;
pub const PID_TAG_SENT_REPRESENTING_SMTP_ADDRESS: u16 = 0x5D02;
pub const PID_TAG_RECIPIENT_DISPLAY_NAME: u16 = 0x5FF6;

// Streams of the __nameid_version1.0 storage
pub const PID_TAG_NAMEID_STREAM_GUID: u16 = 0x0002;
pub const PID_TAG_NAMEID_STREAM_ENTRY: u16 = 0x0003;
pub const PID_TAG_NAMEID_STREAM_STRING: u16 = 0x0004;

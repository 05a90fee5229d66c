use chrono::NaiveDateTime;

/// A fully extracted MAPI message.
///
/// Built once from a CFB container and read-only afterwards. Optional
/// fields are `None` when the underlying property or substream is absent
/// from the container.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Message class, e.g. `IPM.Note`
    pub message_class: Option<String>,
    /// RFC 5322 internet message id
    pub message_id: Option<String>,
    /// Display string of the To line
    pub display_to: Option<String>,
    /// Display string of the Cc line
    pub display_cc: Option<String>,
    /// Display string of the Bcc line
    pub display_bcc: Option<String>,
    /// Sender display name
    pub sender_name: Option<String>,
    /// Sender address in the sender's address type
    pub sender_email_address: Option<String>,
    /// Sender SMTP address
    pub sender_smtp_address: Option<String>,
    /// Message subject
    pub subject: Option<String>,
    /// Plain-text body
    pub body_text: Option<String>,
    /// HTML body; derived from the RTF body when the HTML property is
    /// absent
    pub body_html: Option<String>,
    /// Decompressed RTF body
    pub body_rtf: Option<Vec<u8>>,
    /// Content id referenced by the body
    pub body_content_id: Option<String>,
    /// Transport (RFC 5322) headers as stored by the spooler
    pub transport_headers: Option<String>,
    /// Whether the RTF body is in sync with the plain-text body
    pub rtf_in_sync: Option<bool>,
    /// Whether the message carries attachments
    pub has_attachments: Option<bool>,
    /// Recipient count from the property-stream header
    pub num_recipients: u32,
    /// Attachment count from the property-stream header
    pub num_attachments: u32,
    /// Delivery time (UTC)
    pub delivery_time: Option<NaiveDateTime>,
    /// Client submit time (UTC)
    pub submit_time: Option<NaiveDateTime>,
    /// Receipt time (UTC)
    pub receipt_time: Option<NaiveDateTime>,
    /// Recipients in directory-entry order
    pub recipients: Vec<Recipient>,
    /// Attachments in directory-entry order
    pub attachments: Vec<Attachment>,
}

/// A single recipient of a message.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recipient {
    pub display_name: Option<String>,
    pub smtp_address: Option<String>,
    pub email_address: Option<String>,
}

/// A single attachment of a message.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attachment {
    /// Long file name
    pub file_name: Option<String>,
    /// MIME type, e.g. `application/pdf`
    pub mime_type: Option<String>,
    /// Size in bytes including attachment metadata
    pub size: Option<i32>,
    /// Zero-based attachment number
    pub number: Option<i32>,
    /// Content id for inline references
    pub content_id: Option<String>,
    /// MAPI object type (see `constants::object_types`)
    pub object_type: Option<i32>,
    /// Attach method (PidTagAttachMethod)
    pub attach_method: Option<i32>,
    /// Raw attachment bytes, absent for embedded message objects
    pub data: Option<Vec<u8>>,
    /// Embedded message when the attachment is itself a MSG sub-tree
    pub embedded: Option<Box<Message>>,
}

impl Attachment {
    /// True when the attachment carries an embedded Outlook message.
    pub fn is_message(&self) -> bool {
        self.mime_type.as_deref() == Some("message/rfc822")
    }
}

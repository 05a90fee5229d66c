use super::properties::{PropertyStream, StorageKind};
use crate::cfb::{CfbContainer, DirectoryEntry};
use crate::reader::decode;
use crate::rtf;
use log::{debug, warn};
use mapi_core::constants::{substream_name, tags, types, MSG_ATTACH, MSG_EMBEDDED, MSG_RECIP};
use mapi_core::models::filetime_to_datetime;
use mapi_core::{Attachment, Message, Recipient, Result};
use std::io::{Read, Seek};

/// Compressed RTF bodies below this size cannot carry the 16-byte
/// wrapper header and are treated as absent
const RTF_MIN_SIZE: usize = 16;

/// Embedded messages nested deeper than this are treated as absent
const MAX_EMBED_DEPTH: usize = 32;

/// Extract the message held by a CFB container.
pub fn read_message<R: Read + Seek>(reader: &mut R, container: &CfbContainer) -> Result<Message> {
    build_message(reader, container, container.root(), StorageKind::Root, 0)
}

fn build_message<R: Read + Seek>(
    reader: &mut R,
    container: &CfbContainer,
    storage: &DirectoryEntry,
    kind: StorageKind,
    depth: usize,
) -> Result<Message> {
    let props = PropertyStream::read(reader, container, storage, kind)?;

    let mut message = Message {
        message_class: unicode(reader, container, storage, tags::PID_TAG_MESSAGE_CLASS)?,
        message_id: unicode(reader, container, storage, tags::PID_TAG_INTERNET_MESSAGE_ID)?,
        display_to: unicode(reader, container, storage, tags::PID_TAG_DISPLAY_TO)?,
        display_cc: unicode(reader, container, storage, tags::PID_TAG_DISPLAY_CC)?,
        display_bcc: unicode(reader, container, storage, tags::PID_TAG_DISPLAY_BCC)?,
        sender_name: unicode(reader, container, storage, tags::PID_TAG_SENDER_NAME)?,
        sender_email_address: unicode(
            reader,
            container,
            storage,
            tags::PID_TAG_SENDER_EMAIL_ADDRESS,
        )?,
        sender_smtp_address: unicode(
            reader,
            container,
            storage,
            tags::PID_TAG_SENDER_SMTP_ADDRESS,
        )?,
        subject: unicode(reader, container, storage, tags::PID_TAG_SUBJECT)?,
        body_text: unicode(reader, container, storage, tags::PID_TAG_BODY)?,
        body_content_id: unicode(reader, container, storage, tags::PID_TAG_BODY_CONTENT_ID)?,
        transport_headers: unicode(
            reader,
            container,
            storage,
            tags::PID_TAG_TRANSPORT_MESSAGE_HEADERS,
        )?,
        rtf_in_sync: props.boolean(tags::PID_TAG_RTF_IN_SYNC, types::PTYP_BOOLEAN),
        has_attachments: props.boolean(tags::PID_TAG_HAS_ATTACHMENTS, types::PTYP_BOOLEAN),
        num_recipients: props.num_recipients()?,
        num_attachments: props.num_attachments()?,
        delivery_time: props
            .int64(tags::PID_TAG_MESSAGE_DELIVERY_TIME, types::PTYP_TIME)
            .and_then(filetime_to_datetime),
        submit_time: props
            .int64(tags::PID_TAG_CLIENT_SUBMIT_TIME, types::PTYP_TIME)
            .and_then(filetime_to_datetime),
        receipt_time: props
            .int64(tags::PID_TAG_RECEIPT_TIME, types::PTYP_TIME)
            .and_then(filetime_to_datetime),
        ..Default::default()
    };

    message.body_rtf = match substream(
        reader,
        container,
        storage,
        tags::PID_TAG_RTF_COMPRESSED,
        types::PTYP_BINARY,
    )? {
        Some(data) if data.len() >= RTF_MIN_SIZE => match rtf::decompress(&data) {
            Ok(decompressed) => Some(decompressed),
            Err(err) => {
                warn!("discarding undecodable RTF body: {}", err);
                None
            }
        },
        Some(data) => {
            warn!("discarding {}-byte RTF body", data.len());
            None
        }
        None => None,
    };

    // The HTML body falls back to the RTF text; turning RTF into real
    // HTML is left to the caller
    message.body_html = match unicode(reader, container, storage, tags::PID_TAG_BODY_HTML)? {
        Some(html) => Some(html),
        None => message.body_rtf.as_deref().and_then(decode::utf8),
    };

    for entry in container.select_children(storage, MSG_RECIP) {
        message
            .recipients
            .push(build_recipient(reader, container, entry)?);
    }

    for entry in container.select_children(storage, MSG_ATTACH) {
        message
            .attachments
            .push(build_attachment(reader, container, entry, depth)?);
    }

    debug!(
        "message '{}': {} recipients, {} attachments",
        message.subject.as_deref().unwrap_or(""),
        message.recipients.len(),
        message.attachments.len()
    );

    Ok(message)
}

fn build_recipient<R: Read + Seek>(
    reader: &mut R,
    container: &CfbContainer,
    storage: &DirectoryEntry,
) -> Result<Recipient> {
    PropertyStream::read(reader, container, storage, StorageKind::Recipient)?;

    let display_name =
        match unicode(reader, container, storage, tags::PID_TAG_RECIPIENT_DISPLAY_NAME)? {
            Some(name) => Some(name),
            None => unicode(reader, container, storage, tags::PID_TAG_DISPLAY_NAME)?,
        };

    Ok(Recipient {
        display_name,
        smtp_address: unicode(reader, container, storage, tags::PID_TAG_SMTP_ADDRESS)?,
        email_address: unicode(reader, container, storage, tags::PID_TAG_EMAIL_ADDRESS)?,
    })
}

fn build_attachment<R: Read + Seek>(
    reader: &mut R,
    container: &CfbContainer,
    storage: &DirectoryEntry,
    depth: usize,
) -> Result<Attachment> {
    let props = PropertyStream::read(reader, container, storage, StorageKind::Attachment)?;

    let file_name = match unicode(reader, container, storage, tags::PID_TAG_ATTACH_LONG_FILENAME)? {
        Some(name) => Some(name),
        None => unicode(reader, container, storage, tags::PID_TAG_ATTACH_FILENAME)?,
    };

    let embedded = match container.find_child(storage, MSG_EMBEDDED) {
        Some(sub) if sub.is_storage() => {
            if depth < MAX_EMBED_DEPTH {
                Some(Box::new(build_message(
                    reader,
                    container,
                    sub,
                    StorageKind::Embedded,
                    depth + 1,
                )?))
            } else {
                warn!("ignoring embedded message nested deeper than {}", MAX_EMBED_DEPTH);
                None
            }
        }
        _ => None,
    };

    Ok(Attachment {
        file_name,
        mime_type: unicode(reader, container, storage, tags::PID_TAG_ATTACH_MIME_TAG)?,
        size: props
            .int32(tags::PID_TAG_ATTACH_SIZE, types::PTYP_INTEGER32)
            .map(|(value, _)| value),
        number: props
            .int32(tags::PID_TAG_ATTACH_NUMBER, types::PTYP_INTEGER32)
            .map(|(value, _)| value),
        content_id: unicode(reader, container, storage, tags::PID_TAG_ATTACH_CONTENT_ID)?,
        object_type: props
            .int32(tags::PID_TAG_OBJECT_TYPE, types::PTYP_INTEGER32)
            .map(|(value, _)| value),
        attach_method: props
            .int32(tags::PID_TAG_ATTACH_METHOD, types::PTYP_INTEGER32)
            .map(|(value, _)| value),
        data: substream(
            reader,
            container,
            storage,
            tags::PID_TAG_ATTACH_DATA_BINARY,
            types::PTYP_BINARY,
        )?,
        embedded,
    })
}

/// Read the substream of `storage` carrying property `(tag, ptype)`
fn substream<R: Read + Seek>(
    reader: &mut R,
    container: &CfbContainer,
    storage: &DirectoryEntry,
    tag: u16,
    ptype: u16,
) -> Result<Option<Vec<u8>>> {
    container.read_child_stream(reader, storage, &substream_name(tag, ptype))
}

/// Read a PtypString property as UTF-16LE
fn unicode<R: Read + Seek>(
    reader: &mut R,
    container: &CfbContainer,
    storage: &DirectoryEntry,
    tag: u16,
) -> Result<Option<String>> {
    Ok(substream(reader, container, storage, tag, types::PTYP_STRING)?
        .as_deref()
        .and_then(decode::utf16le))
}

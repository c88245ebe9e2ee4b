//! Attachment classification and extraction

use serde::{Deserialize, Serialize};

use crate::charsets;
use crate::config::ParserConfig;
use crate::mime::{Disposition, MimeNode};

/// One extracted attachment, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    /// Resolved filename.
    pub name: String,

    /// Lower-cased `primary/secondary` media type.
    pub mime_type: String,

    /// Payload, transcoded when the part declared a charset parameter.
    pub data: Vec<u8>,

    /// Raw Content-Transfer-Encoding label; set only when body decoding
    /// was suppressed by configuration.
    pub encoding: Option<String>,

    /// Content-Id with the surrounding angle brackets stripped, for
    /// inline-image references from HTML bodies.
    pub content_id: Option<String>,
}

/// Walk the tree and collect every part classified as an attachment.
///
/// A node is a candidate if it carries an inline or attachment disposition,
/// or if its primary type is `image` or `application` regardless of
/// disposition. Candidates without a resolvable filename are silently
/// skipped. A matching branch node is evaluated leaf-like on its own
/// parameters before its children are visited.
#[must_use]
pub fn collect_attachments(tree: &MimeNode, config: &ParserConfig) -> Vec<AttachmentRecord> {
    let mut records = Vec::new();
    collect_into(tree, config, &mut records);
    records
}

fn collect_into(node: &MimeNode, config: &ParserConfig, records: &mut Vec<AttachmentRecord>) {
    if is_candidate(node) {
        if let Some(record) = extract_record(node, config) {
            records.push(record);
        }
    }
    for child in node.children() {
        collect_into(child, config, records);
    }
}

fn is_candidate(node: &MimeNode) -> bool {
    matches!(
        node.disposition,
        Some(Disposition::Attachment | Disposition::Inline)
    ) || node.primary == "image"
        || node.primary == "application"
}

fn extract_record(node: &MimeNode, config: &ParserConfig) -> Option<AttachmentRecord> {
    let name = resolve_filename(node)?;

    let body = node.body().unwrap_or_default();
    let data = match node.charset() {
        Some(charset) => charsets::transcode(body, charset, &config.charset),
        None => body.to_vec(),
    };

    let encoding = if config.decode_bodies {
        None
    } else {
        node.headers
            .get("content-transfer-encoding")
            .map(str::to_string)
    };

    let content_id = node.headers.get("content-id").map(|cid| {
        cid.trim()
            .trim_start_matches('<')
            .trim_end_matches('>')
            .to_string()
    });

    Some(AttachmentRecord {
        name,
        mime_type: node.mimetype(),
        data,
        encoding,
        content_id,
    })
}

/// Filename resolution order: disposition `filename`, disposition
/// `filename*`, content-type `name`, content-type `name*`. Extended
/// parameters use RFC 5987/6266 decoding. No match means the part is
/// not an attachment.
fn resolve_filename(node: &MimeNode) -> Option<String> {
    if let Some(name) = node.disposition_params.get("filename") {
        return Some(name.clone());
    }
    if let Some(name) = node.disposition_params.get("filename*") {
        return Some(decode_rfc5987(name));
    }
    if let Some(name) = node.ctype_params.get("name") {
        return Some(name.clone());
    }
    if let Some(name) = node.ctype_params.get("name*") {
        return Some(decode_rfc5987(name));
    }
    None
}

/// Decode an RFC 5987 extended parameter value: `charset'lang'percent-bytes`.
///
/// Values missing the two apostrophe separators are returned verbatim.
fn decode_rfc5987(value: &str) -> String {
    let mut sections = value.splitn(3, '\'');
    let charset = sections.next().unwrap_or("");
    let _language = sections.next();
    let Some(encoded) = sections.next() else {
        return value.to_string();
    };

    let bytes = percent_decode(encoded);
    charsets::decode_text(&bytes, Some(charset).filter(|label| !label.is_empty()))
}

fn percent_decode(input: &str) -> Vec<u8> {
    let raw = input.as_bytes();
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'%'
            && i + 2 < raw.len()
            && let (Some(hi), Some(lo)) = (hex_value(raw[i + 1]), hex_value(raw[i + 2]))
        {
            out.push((hi << 4) | lo);
            i += 3;
        } else {
            out.push(raw[i]);
            i += 1;
        }
    }
    out
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

//! Record assembly from raw message bytes

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::address::{AddressEntry, parse_address_list};
use crate::attachments::collect_attachments;
use crate::body::{select_body, strip_empty_lines};
use crate::bounce::{delivery_status_message, is_bounce_notice, original_message};
use crate::config::ParserConfig;
use crate::error::{ParseError, Result};
use crate::forward::unwrap_forwarded;
use crate::mime::MimeNode;
use crate::priority::parse_priority;
use crate::record::{EmailRecord, ThreadType};

static HEADER_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(.*?)\r?\n\r?\n").unwrap());

/// Resolves a recipient address to a mailbox identifier.
///
/// Implemented by the caller's address directory; decoding probes To,
/// Delivered-To, then Cc addresses and takes the first hit.
pub trait RecipientLookup {
    /// The identifier registered for `email`, if this address is known.
    fn resolve_identifier(&self, email: &str) -> Option<u32>;
}

/// Lookup for callers without a recipient directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl RecipientLookup for NoLookup {
    fn resolve_identifier(&self, _email: &str) -> Option<u32> {
        None
    }
}

/// Decode one raw RFC 2822/MIME message into an [`EmailRecord`].
///
/// Structural decode failures abort with an error; every extraction-stage
/// anomaly degrades gracefully so a best-effort record is produced whenever
/// the MIME structure itself was parseable.
pub fn parse_email(
    raw: &[u8],
    config: &ParserConfig,
    lookup: &dyn RecipientLookup,
) -> Result<EmailRecord> {
    let parsed = mailparse::parse_mail(raw).map_err(|e| ParseError::Structure(e.to_string()))?;
    let tree = MimeNode::from_parsed(&parsed, config.decode_bodies)?;

    let mut header_text = split_body_header(raw);
    let (tree, rebuilt_header) = unwrap_forwarded(tree);
    if let Some(rebuilt) = rebuilt_header {
        header_text = rebuilt;
    }
    if tree.headers.len() <= 1 {
        return Err(ParseError::EmptyMessage);
    }

    let (email, name) = resolve_sender(&tree);
    let email_id = resolve_recipient_id(&tree, lookup);

    let (message, thread_type, in_reply_to, references) = if is_bounce_notice(&tree) {
        debug!("message classified as delivery-status bounce notice");
        let references =
            original_message(&tree).and_then(|msg| msg.headers.get("references").map(str::to_string));
        let message = delivery_status_message(&tree).unwrap_or_default();
        (message, ThreadType::Notice, None, references)
    } else {
        let message = strip_empty_lines(&select_body(&tree, config));
        let in_reply_to = tree.headers.get("in-reply-to").map(str::to_string);
        let references = tree.headers.get("references").map(str::to_string);
        (message, ThreadType::Message, in_reply_to, references)
    };

    let subject = tree.headers.get("subject").map(str::to_string);
    let mid = tree
        .headers
        .get("message-id")
        .map_or_else(|| synthesize_message_id(&header_text), str::to_string);
    let priority_id = parse_priority(&header_text);
    let date = tree
        .headers
        .get("date")
        .and_then(|value| DateTime::parse_from_rfc2822(value).ok())
        .map(|dt| dt.with_timezone(&Utc));
    let (reply_to, reply_to_name) = resolve_reply_to(&tree);

    let attachments = config
        .capture_attachments
        .then(|| collect_attachments(&tree, config));

    debug!("decoded email: subject={subject:?} from={email}");

    Ok(EmailRecord {
        email,
        name,
        email_id,
        subject,
        header: header_text,
        mid,
        priority_id,
        message,
        thread_type,
        in_reply_to,
        references,
        reply_to,
        reply_to_name,
        date,
        attachments,
    })
}

/// The raw header text: everything before the first blank line.
fn split_body_header(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    match HEADER_SECTION.captures(&text) {
        Some(caps) => caps[1].to_string(),
        None => text.into_owned(),
    }
}

/// Deterministic fallback Message-Id derived from the raw header text.
fn synthesize_message_id(header_text: &str) -> String {
    let digest = Sha256::digest(header_text.as_bytes());
    format!("<{digest:x}@local>")
}

/// First `From` entry whose address validates, defaulting to the first
/// entry. The display name falls back to the address itself.
fn resolve_sender(tree: &MimeNode) -> (String, String) {
    let Some(value) = tree.headers.get("from") else {
        return (String::new(), String::new());
    };
    let Ok(list) = parse_address_list("From", &[value]) else {
        return (String::new(), String::new());
    };
    let Some(first) = list.first() else {
        return (String::new(), String::new());
    };

    let sender = list.iter().find(|entry| entry.is_valid()).unwrap_or(first);
    let email = sender.email();
    let name = match &sender.personal {
        Some(personal) if !personal.is_empty() => personal.clone(),
        _ => email.clone(),
    };
    (email, name)
}

/// Probe To and Delivered-To first (concatenated, not deduplicated; a
/// blind-copy recipient may only appear in Delivered-To), then Cc.
fn resolve_recipient_id(tree: &MimeNode, lookup: &dyn RecipientLookup) -> Option<u32> {
    let mut recipients = address_entries(tree, "to");
    recipients.extend(address_entries(tree, "delivered-to"));
    for entry in &recipients {
        if let Some(id) = lookup.resolve_identifier(&entry.email()) {
            return Some(id);
        }
    }
    for entry in address_entries(tree, "cc") {
        if let Some(id) = lookup.resolve_identifier(&entry.email()) {
            return Some(id);
        }
    }
    None
}

fn address_entries(tree: &MimeNode, header: &str) -> Vec<AddressEntry> {
    let values = tree.headers.get_all(header);
    if values.is_empty() {
        return Vec::new();
    }
    parse_address_list(header, &values).unwrap_or_default()
}

fn resolve_reply_to(tree: &MimeNode) -> (Option<String>, Option<String>) {
    let Some(value) = tree.headers.get("reply-to") else {
        return (None, None);
    };
    let Ok(list) = parse_address_list("Reply-To", &[value]) else {
        return (None, None);
    };
    let Some(entry) = list.first() else {
        return (None, None);
    };

    let name = entry
        .personal
        .as_ref()
        .map(|personal| personal.trim_matches(['"', ' ', '\t', '\n', '\r']).to_string())
        .filter(|personal| !personal.is_empty());
    (Some(entry.email()), name)
}

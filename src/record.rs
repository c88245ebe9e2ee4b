//! The assembled output record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attachments::AttachmentRecord;

/// Thread classification of the resulting record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreadType {
    /// A regular inbound message.
    #[default]
    Message,
    /// An automated delivery-failure notice.
    Notice,
}

/// Structured record decoded from one raw message, ready for the
/// ticket-creation pipeline. Built once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Sender address in `mailbox@host` form; empty when `From` was
    /// missing or unparseable.
    pub email: String,

    /// Sender display name, falling back to the address itself.
    pub name: String,

    /// Identifier of the recipient mailbox resolved by the lookup
    /// collaborator, probing To, Delivered-To, then Cc.
    pub email_id: Option<u32>,

    /// Subject header, decoded.
    pub subject: Option<String>,

    /// Raw header text; rebuilt from the inner message when a forwarded
    /// wrapper was unwrapped.
    pub header: String,

    /// Message-Id, synthesized deterministically from the header text when
    /// the header was absent.
    pub mid: String,

    /// Priority tier derived from X-Priority; 0 = unspecified.
    pub priority_id: u8,

    /// Selected display body, or the rendered delivery-status block for
    /// bounce notices.
    pub message: String,

    pub thread_type: ThreadType,

    /// In-Reply-To header; always absent for bounce notices.
    pub in_reply_to: Option<String>,

    /// References header; taken from the embedded original message for
    /// bounce notices.
    pub references: Option<String>,

    /// Reply-To address.
    pub reply_to: Option<String>,

    /// Reply-To display name, trimmed of quotes and whitespace.
    pub reply_to_name: Option<String>,

    /// Parsed Date header.
    pub date: Option<DateTime<Utc>>,

    /// Present only when attachment capture is enabled.
    pub attachments: Option<Vec<AttachmentRecord>>,
}

impl EmailRecord {
    /// Whether this record represents a delivery-failure notice.
    #[must_use]
    pub fn is_bounce(&self) -> bool {
        self.thread_type == ThreadType::Notice
    }
}

// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Ticket-oriented email decoding
//!
//! Decodes one raw RFC 2822/MIME message into a structured [`EmailRecord`]
//! for a downstream ticket-creation pipeline: sender address and display
//! name, resolved recipient identifier, subject, chosen display body,
//! attachments, threading references, priority tier, and bounce status.
//!
//! # Features
//!
//! - Recursive multipart-tree navigation over an owned, immutable node tree
//! - Body selection with HTML and plain-text display policies
//! - Attachment classification with RFC 5987/6266 extended filenames
//! - Forwarded `message/rfc822` wrapper unwrapping
//! - Delivery-status bounce detection and report rendering
//! - Charset transcoding of part content and attachment payloads
//!
//! # Example
//!
//! ```rust
//! use mail_ingest::{NoLookup, ParserConfig, parse_email};
//!
//! let raw = b"From: John Doe <john@example.com>\r\nSubject: Hello\r\n\r\nBody text";
//! let record = parse_email(raw, &ParserConfig::default(), &NoLookup).unwrap();
//!
//! assert_eq!(record.email, "john@example.com");
//! assert_eq!(record.name, "John Doe");
//! ```

mod address;
mod attachments;
mod body;
mod bounce;
mod charsets;
mod config;
mod error;
mod forward;
mod headers;
mod mime;
mod parser;
mod priority;
mod record;

pub use address::{AddressEntry, parse_address_list};
pub use attachments::{AttachmentRecord, collect_attachments};
pub use body::{EMPTY_BODY_PLACEHOLDER, select_body, strip_empty_lines};
pub use bounce::{delivery_status_message, is_bounce_notice, original_message};
pub use charsets::{decode_text, transcode};
pub use config::ParserConfig;
pub use error::{ParseError, Result};
pub use forward::unwrap_forwarded;
pub use headers::HeaderBlock;
pub use mime::{Disposition, MimeNode, NodeContent};
pub use parser::{NoLookup, RecipientLookup, parse_email};
pub use priority::parse_priority;
pub use record::{EmailRecord, ThreadType};

//! Owned MIME tree built from the decoder output

use std::collections::BTreeMap;

use mailparse::{DispositionType, ParsedMail};

use crate::charsets;
use crate::error::{ParseError, Result};
use crate::headers::HeaderBlock;

/// `Content-Disposition` classification of a part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Displayable in place.
    Inline,
    /// A separate file.
    Attachment,
    /// Any other disposition token, kept verbatim.
    Extension(String),
}

/// Content of a node: leaves carry bytes, branches carry ordered children.
///
/// Children are exclusively owned by their parent, so the tree is acyclic
/// by construction.
#[derive(Debug, Clone)]
pub enum NodeContent {
    Body(Vec<u8>),
    Parts(Vec<MimeNode>),
}

/// One node of the decoded MIME tree. Immutable after construction; every
/// extraction pass is a read-only traversal.
#[derive(Debug, Clone)]
pub struct MimeNode {
    /// Lower-cased primary media type ("text", "image", ...).
    pub primary: String,
    /// Lower-cased media subtype ("plain", "rfc822", ...).
    pub secondary: String,
    /// Content-Type parameters, keys lower-cased.
    pub ctype_params: BTreeMap<String, String>,
    /// Disposition, present only when the part carried the header.
    pub disposition: Option<Disposition>,
    /// Content-Disposition parameters, keys lower-cased.
    pub disposition_params: BTreeMap<String, String>,
    /// The part's own headers, duplicates preserved in order.
    pub headers: HeaderBlock,
    pub content: NodeContent,
}

impl MimeNode {
    /// Build an owned tree from the decoder's borrowed structure.
    ///
    /// A `message/rfc822` part whose payload parses as a message becomes a
    /// branch holding the embedded message as its only child, so forwarded
    /// wrappers and bounce originals are navigable like any other subtree.
    ///
    /// When `decode_bodies` is false, leaf bodies keep their raw
    /// transfer-encoded bytes.
    pub fn from_parsed(mail: &ParsedMail<'_>, decode_bodies: bool) -> Result<Self> {
        let (primary, secondary) = split_mimetype(&mail.ctype.mimetype);

        let has_disposition = mail
            .headers
            .iter()
            .any(|h| h.get_key().eq_ignore_ascii_case("content-disposition"));
        let parsed_disp = mail.get_content_disposition();
        let disposition = has_disposition.then(|| match parsed_disp.disposition {
            DispositionType::Inline => Disposition::Inline,
            DispositionType::Attachment => Disposition::Attachment,
            DispositionType::FormData => Disposition::Extension("form-data".to_string()),
            DispositionType::Extension(ref token) => Disposition::Extension(token.clone()),
        });

        let headers = HeaderBlock::from_pairs(
            mail.headers.iter().map(|h| (h.get_key(), h.get_value())),
        );

        let content = if mail.subparts.is_empty() {
            let body = if decode_bodies {
                mail.get_body_raw()
                    .map_err(|e| ParseError::Structure(e.to_string()))?
            } else {
                raw_body(mail)
            };
            if primary == "message" && secondary == "rfc822" && !body.is_empty() {
                match mailparse::parse_mail(&body) {
                    Ok(embedded) => {
                        NodeContent::Parts(vec![Self::from_parsed(&embedded, decode_bodies)?])
                    }
                    Err(_) => NodeContent::Body(body),
                }
            } else {
                NodeContent::Body(body)
            }
        } else {
            let mut parts = Vec::with_capacity(mail.subparts.len());
            for sub in &mail.subparts {
                parts.push(Self::from_parsed(sub, decode_bodies)?);
            }
            NodeContent::Parts(parts)
        };

        Ok(Self {
            primary,
            secondary,
            ctype_params: mail.ctype.params.clone(),
            disposition,
            disposition_params: parsed_disp.params,
            headers,
            content,
        })
    }

    /// The `primary/secondary` form.
    #[must_use]
    pub fn mimetype(&self) -> String {
        format!("{}/{}", self.primary, self.secondary)
    }

    /// Child nodes; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.content {
            NodeContent::Parts(parts) => parts,
            NodeContent::Body(_) => &[],
        }
    }

    /// Leaf body bytes, if this node is a leaf.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        match &self.content {
            NodeContent::Body(body) => Some(body),
            NodeContent::Parts(_) => None,
        }
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.content, NodeContent::Body(_))
    }

    /// Declared charset parameter, if any.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.ctype_params.get("charset").map(String::as_str)
    }

    /// Depth-first search for displayable content of the given media type.
    ///
    /// A leaf qualifies only if its disposition is absent or inline and its
    /// type matches case-insensitively; qualifying content is decoded using
    /// the declared charset parameter when present. Sibling matches are
    /// concatenated. `depth == 0` stops descent; a negative depth is
    /// unbounded.
    #[must_use]
    pub fn find_text(&self, mimetype: &str, depth: i32) -> String {
        if let NodeContent::Body(body) = &self.content {
            if matches!(self.disposition, None | Some(Disposition::Inline))
                && self.mimetype().eq_ignore_ascii_case(mimetype)
            {
                return charsets::decode_text(body, self.charset());
            }
            return String::new();
        }

        let mut data = String::new();
        if depth != 0 {
            for part in self.children() {
                data.push_str(&part.find_text(mimetype, depth - 1));
            }
        }
        data
    }
}

fn split_mimetype(mimetype: &str) -> (String, String) {
    let lower = mimetype.to_lowercase();
    match lower.split_once('/') {
        Some((primary, secondary)) => (primary.to_string(), secondary.to_string()),
        None => (lower, String::new()),
    }
}

fn raw_body(mail: &ParsedMail<'_>) -> Vec<u8> {
    use mailparse::body::Body;
    match mail.get_body_encoded() {
        Body::Base64(body) | Body::QuotedPrintable(body) => body.get_raw().to_vec(),
        Body::SevenBit(body) | Body::EightBit(body) => body.get_raw().to_vec(),
        Body::Binary(body) => body.get_raw().to_vec(),
    }
}

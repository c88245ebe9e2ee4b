//! Decode configuration

/// Options controlling body selection, attachment capture, and charsets.
///
/// Passed explicitly into every decode; nothing is read from ambient state.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Prefer the HTML body representation for display when true,
    /// plain text when false.
    pub html_body: bool,

    /// Populate [`EmailRecord::attachments`](crate::EmailRecord::attachments).
    pub capture_attachments: bool,

    /// Target charset for attachment payload transcoding.
    pub charset: String,

    /// Transfer-decode part bodies. When false, attachment payloads stay
    /// in their wire encoding and carry the raw Content-Transfer-Encoding
    /// label so the caller knows re-decoding is needed.
    pub decode_bodies: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            html_body: true,
            capture_attachments: true,
            charset: "UTF-8".to_string(),
            decode_bodies: true,
        }
    }
}

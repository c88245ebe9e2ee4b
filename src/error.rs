//! Error types for message decoding

use thiserror::Error;

/// Errors that can occur while decoding a raw message.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The MIME decoder rejected the input. Fatal: no partial record is
    /// produced.
    #[error("failed to decode MIME structure: {0}")]
    Structure(String),

    /// The message had no usable header block.
    #[error("message has no parseable headers")]
    EmptyMessage,

    /// The address grammar parser rejected a header value. The record
    /// builder degrades by leaving the affected field empty instead of
    /// aborting the decode.
    #[error("invalid address list in {header}: {details}")]
    AddressList { header: String, details: String },
}

/// Result type for message decoding operations
pub type Result<T> = std::result::Result<T, ParseError>;

//! Address-list parsing over the RFC 822 grammar parser

use std::sync::LazyLock;

use mailparse::MailAddr;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// One parsed mailbox from an address header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEntry {
    /// Local part, before the `@`.
    pub mailbox: String,

    /// Domain, after the `@`.
    pub host: String,

    /// Display name with surrounding quotes stripped.
    pub personal: Option<String>,
}

impl AddressEntry {
    /// The `mailbox@host` form.
    #[must_use]
    pub fn email(&self) -> String {
        format!("{}@{}", self.mailbox, self.host)
    }

    /// Whether `mailbox@host` is a syntactically plausible address.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        EMAIL_REGEX.is_match(&self.email())
    }
}

/// Parse one or more occurrences of an address header into entries.
///
/// Repeated values (e.g. `Delivered-To`) are joined with `", "` before
/// grammar parsing, since a repeated single-recipient header is equivalent
/// to a comma-separated list. Groups are flattened into their member
/// mailboxes. A grammar rejection is an error, never an empty list.
pub fn parse_address_list(header: &str, values: &[&str]) -> Result<Vec<AddressEntry>> {
    let joined = values.join(", ");
    let parsed = mailparse::addrparse(&joined).map_err(|e| ParseError::AddressList {
        header: header.to_string(),
        details: e.to_string(),
    })?;

    let mut entries = Vec::new();
    for addr in parsed.iter() {
        match addr {
            MailAddr::Single(info) => entries.push(entry_from_single(info)),
            MailAddr::Group(group) => entries.extend(group.addrs.iter().map(entry_from_single)),
        }
    }
    Ok(entries)
}

fn entry_from_single(info: &mailparse::SingleInfo) -> AddressEntry {
    let (mailbox, host) = info.addr.rsplit_once('@').map_or_else(
        || (info.addr.clone(), String::new()),
        |(mailbox, host)| (mailbox.to_string(), host.to_string()),
    );

    AddressEntry {
        mailbox,
        host,
        personal: info
            .display_name
            .as_ref()
            .map(|name| name.trim().trim_matches('"').to_string())
            .filter(|name| !name.is_empty()),
    }
}

//! X-Priority header mapping

use std::sync::LazyLock;

use regex::Regex;

static X_PRIORITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)x-priority:([^\r\n]*)").unwrap());

/// Map the `X-Priority` value found in raw header text to a priority tier.
///
/// 0 means unspecified or non-numeric. Sender values above 4 map to tier 1,
/// 3 and 4 to tier 2, 1 and 2 to tier 3, matching the downstream pipeline's
/// priority identifiers.
#[must_use]
pub fn parse_priority(raw_header: &str) -> u8 {
    let Some(caps) = X_PRIORITY.captures(raw_header) else {
        return 0;
    };
    let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
    match digits.parse::<u32>() {
        Ok(value) if value > 4 => 1,
        Ok(value) if value >= 3 => 2,
        Ok(value) if value > 0 => 3,
        _ => 0,
    }
}

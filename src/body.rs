//! Display body selection

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ParserConfig;
use crate::mime::MimeNode;

/// Placeholder substituted when the selected body trims to nothing.
pub const EMPTY_BODY_PLACEHOLDER: &str = "--";

/// Wrap width for HTML-to-text conversion in plain mode.
const HTML_TO_TEXT_WIDTH: usize = 100;

static EMPTY_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Pick the best displayable body representation for the configured mode.
///
/// Read-only over the tree: selecting twice under the same configuration
/// returns identical output.
#[must_use]
pub fn select_body(tree: &MimeNode, config: &ParserConfig) -> String {
    if config.html_body {
        select_html(tree)
    } else {
        select_plain(tree)
    }
}

fn select_html(tree: &MimeNode) -> String {
    let html = tree.find_text("text/html", -1);
    if !html.is_empty() {
        // Markup noise alone (stray brackets, <br/>) counts as empty.
        return if html
            .trim_matches([' ', '<', '>', 'b', 'r', '/', '\t', '\n', '\r'])
            .is_empty()
        {
            EMPTY_BODY_PLACEHOLDER.to_string()
        } else {
            ammonia::clean(&html)
        };
    }

    let plain = tree.find_text("text/plain", -1);
    if plain.trim().is_empty() {
        EMPTY_BODY_PLACEHOLDER.to_string()
    } else {
        format!("<pre>{}</pre>", escape_html(plain.trim()))
    }
}

fn select_plain(tree: &MimeNode) -> String {
    let mut body = tree.find_text("text/plain", -1);
    if body.is_empty() {
        let html = tree.find_text("text/html", -1);
        if !html.is_empty() {
            let safe = ammonia::clean(&html);
            body = html2text::from_read(safe.as_bytes(), HTML_TO_TEXT_WIDTH).unwrap_or(safe);
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        EMPTY_BODY_PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Collapse runs of three or more newlines left behind by body selection.
#[must_use]
pub fn strip_empty_lines(text: &str) -> String {
    EMPTY_LINES.replace_all(text.trim(), "\n\n").into_owned()
}

/// Minimal HTML escaping for preformatted display blocks.
pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

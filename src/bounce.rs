//! Delivery-status (bounce) report detection

use crate::body::escape_html;
use crate::headers::HeaderBlock;
use crate::mime::MimeNode;

/// True when the message carries a delivery-status report whose `Action`
/// field is `failed` (case-insensitive).
#[must_use]
pub fn is_bounce_notice(tree: &MimeNode) -> bool {
    let status = tree.find_text("message/delivery-status", -1);
    if status.is_empty() {
        return false;
    }

    let fields = HeaderBlock::parse(&status);
    fields
        .get("action")
        .is_some_and(|action| action.trim().eq_ignore_ascii_case("failed"))
}

/// Render the human-readable block of a delivery report.
///
/// Applies only when the top-level type is `multipart/report` with
/// `report-type=delivery-status`; the first direct `text/plain` part is
/// wrapped in an HTML-escaped `<pre>` block.
#[must_use]
pub fn delivery_status_message(tree: &MimeNode) -> Option<String> {
    let is_report = tree.primary == "multipart"
        && tree.secondary == "report"
        && tree
            .ctype_params
            .get("report-type")
            .is_some_and(|kind| kind.eq_ignore_ascii_case("delivery-status"));
    if !is_report {
        return None;
    }

    Some(format!(
        "<pre>{}</pre>",
        escape_html(&tree.find_text("text/plain", 1))
    ))
}

/// The original message embedded in a bounce: the first child of the first
/// direct `message/rfc822` part.
#[must_use]
pub fn original_message(tree: &MimeNode) -> Option<&MimeNode> {
    tree.children()
        .iter()
        .find(|part| part.primary == "message" && part.secondary == "rfc822")
        .and_then(|part| part.children().first())
}

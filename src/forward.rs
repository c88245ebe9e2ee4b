//! Forwarded-message unwrapping

use tracing::debug;

use crate::mime::{MimeNode, NodeContent};

/// Unwrap a fully forwarded message.
///
/// A top-level `message/rfc822` node with at least one child is replaced by
/// its first child, so threading and sender identification operate on the
/// inner message. The outer `Delivered-To` and `Message-Id` are carried
/// over only when the inner message lacks them; an existing inner
/// `Message-Id` is never overwritten. Returns the working tree and, when
/// unwrapping happened, the rebuilt raw-header text of the inner message.
#[must_use]
pub fn unwrap_forwarded(mut tree: MimeNode) -> (MimeNode, Option<String>) {
    let is_wrapper = tree.primary == "message"
        && tree.secondary == "rfc822"
        && !tree.children().is_empty();
    if !is_wrapper {
        return (tree, None);
    }

    let delivered_to: Vec<String> = tree
        .headers
        .get_all("delivered-to")
        .iter()
        .map(|value| (*value).to_string())
        .collect();
    let message_id = tree.headers.get("message-id").map(str::to_string);

    let NodeContent::Parts(parts) = &mut tree.content else {
        return (tree, None);
    };
    let mut inner = parts.remove(0);

    if inner.headers.get("delivered-to").is_none() {
        for value in &delivered_to {
            inner.headers.insert("Delivered-To", value);
        }
    }
    if inner.headers.get("message-id").is_none()
        && let Some(mid) = &message_id
    {
        inner.headers.insert("Message-Id", mid);
    }

    let header_text = inner.headers.to_text();
    debug!("unwrapped forwarded message/rfc822 wrapper");
    (inner, Some(header_text))
}

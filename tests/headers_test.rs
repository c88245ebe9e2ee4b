use mail_ingest::{HeaderBlock, parse_priority};

// --- HeaderBlock ---

#[test]
fn test_folded_continuation_line_is_unfolded() {
    let block = HeaderBlock::parse(
        "Content-Type: multipart/mixed;\r\n boundary=\"abc\"\r\nSubject: Hi",
    );
    assert_eq!(
        block.get("content-type"),
        Some("multipart/mixed; boundary=\"abc\"")
    );
    assert_eq!(block.get("subject"), Some("Hi"));
}

#[test]
fn test_tab_continuation_line_is_unfolded() {
    let block = HeaderBlock::parse("Received: from a\r\n\tby b");
    assert_eq!(block.get("received"), Some("from a by b"));
}

#[test]
fn test_blank_lines_are_discarded() {
    let block = HeaderBlock::parse("From: a@x.com\r\n\r\nTo: b@y.com\r\n");
    assert_eq!(block.len(), 2);
    assert_eq!(block.get("to"), Some("b@y.com"));
}

#[test]
fn test_repeated_header_keeps_all_values_in_order() {
    let block = HeaderBlock::parse("Delivered-To: first@x.com\r\nDelivered-To: second@x.com");
    assert_eq!(
        block.get_all("delivered-to"),
        vec!["first@x.com", "second@x.com"]
    );
}

#[test]
fn test_repeated_header_single_lookup_returns_last() {
    let block = HeaderBlock::parse("X-Tag: one\r\nX-Tag: two");
    assert_eq!(block.get("x-tag"), Some("two"));
}

#[test]
fn test_lookup_is_case_insensitive() {
    let block = HeaderBlock::parse("Message-ID: <m@x>");
    assert_eq!(block.get("message-id"), Some("<m@x>"));
    assert_eq!(block.get("MESSAGE-ID"), Some("<m@x>"));
    assert_eq!(block.get("Message-Id"), Some("<m@x>"));
}

#[test]
fn test_missing_header_is_absent() {
    let block = HeaderBlock::parse("Subject: x");
    assert!(block.get("from").is_none());
    assert!(block.get_all("from").is_empty());
}

#[test]
fn test_to_text_title_cases_names() {
    let mut block = HeaderBlock::new();
    block.insert("delivered-to", "a@x.com");
    block.insert("message-id", "<m@x>");
    assert_eq!(
        block.to_text(),
        "Delivered-To: a@x.com\nMessage-Id: <m@x>"
    );
}

// --- parse_priority ---

#[test]
fn test_priority_absent_marker_is_zero() {
    assert_eq!(parse_priority("Subject: urgent stuff\nFrom: a@x.com"), 0);
}

#[test]
fn test_priority_high_sender_values() {
    assert_eq!(parse_priority("X-Priority: 1\nSubject: x"), 3);
    assert_eq!(parse_priority("X-Priority: 2 (High)\nSubject: x"), 3);
}

#[test]
fn test_priority_normal_sender_values() {
    assert_eq!(parse_priority("X-Priority: 3\nSubject: x"), 2);
    assert_eq!(parse_priority("X-Priority: 4\nSubject: x"), 2);
}

#[test]
fn test_priority_lowest_sender_value() {
    assert_eq!(parse_priority("X-Priority: 5 (Lowest)\nSubject: x"), 1);
}

#[test]
fn test_priority_non_numeric_is_zero() {
    assert_eq!(parse_priority("X-Priority: urgent\nSubject: x"), 0);
    assert_eq!(parse_priority("X-Priority: 0\nSubject: x"), 0);
}

#[test]
fn test_priority_marker_is_case_insensitive() {
    assert_eq!(parse_priority("x-priority: 1\nSubject: x"), 3);
}

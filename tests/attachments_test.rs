use mail_ingest::{MimeNode, NoLookup, ParserConfig, collect_attachments, parse_email};

fn decode_tree(raw: &[u8]) -> MimeNode {
    let parsed = mailparse::parse_mail(raw).unwrap();
    MimeNode::from_parsed(&parsed, true).unwrap()
}

fn mixed_message(part_headers: &str, part_body: &str) -> Vec<u8> {
    format!(
        "From: a@x.com\r\n\
         Subject: files\r\n\
         MIME-Version: 1.0\r\n\
         Content-Type: multipart/mixed; boundary=\"mix\"\r\n\
         \r\n\
         --mix\r\n\
         Content-Type: text/plain; charset=utf-8\r\n\
         \r\n\
         see attached\r\n\
         --mix\r\n\
         {part_headers}\r\n\
         \r\n\
         {part_body}\r\n\
         --mix--\r\n"
    )
    .into_bytes()
}

// --- classification ---

#[test]
fn test_disposition_attachment_yields_one_record() {
    let raw = mixed_message(
        "Content-Type: image/png\r\n\
         Content-Disposition: attachment; filename=\"x.png\"\r\n\
         Content-Transfer-Encoding: base64",
        "aGVsbG8=",
    );

    let records = collect_attachments(&decode_tree(&raw), &ParserConfig::default());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "x.png");
    assert_eq!(records[0].mime_type, "image/png");
    assert_eq!(records[0].data, b"hello");
    assert!(records[0].encoding.is_none());
}

#[test]
fn test_application_part_without_disposition_uses_name_parameter() {
    let raw = mixed_message(
        "Content-Type: application/pdf; name=\"y.pdf\"\r\n\
         Content-Transfer-Encoding: base64",
        "aGVsbG8=",
    );

    let records = collect_attachments(&decode_tree(&raw), &ParserConfig::default());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "y.pdf");
    assert_eq!(records[0].mime_type, "application/pdf");
}

#[test]
fn test_plain_text_part_without_name_is_not_an_attachment() {
    let raw = b"From: a@x.com\r\n\
                Subject: x\r\n\
                \r\n\
                just a body";

    let records = collect_attachments(&decode_tree(raw), &ParserConfig::default());
    assert!(records.is_empty());
}

#[test]
fn test_candidate_without_filename_is_silently_skipped() {
    let raw = mixed_message("Content-Type: application/octet-stream", "opaque");

    let records = collect_attachments(&decode_tree(&raw), &ParserConfig::default());
    assert!(records.is_empty());
}

#[test]
fn test_inline_image_with_filename_is_captured() {
    let raw = mixed_message(
        "Content-Type: image/gif\r\n\
         Content-Disposition: inline; filename=\"logo.gif\"\r\n\
         Content-Id: <logo@sender.example>",
        "GIF89a",
    );

    let records = collect_attachments(&decode_tree(&raw), &ParserConfig::default());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "logo.gif");
    assert_eq!(records[0].content_id.as_deref(), Some("logo@sender.example"));
}

#[test]
fn test_extended_filename_parameter_is_decoded() {
    let raw = mixed_message(
        "Content-Type: application/pdf\r\n\
         Content-Disposition: attachment; filename*=utf-8''%E2%82%AC%20rates.pdf",
        "data",
    );

    let records = collect_attachments(&decode_tree(&raw), &ParserConfig::default());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "€ rates.pdf");
}

#[test]
fn test_attachments_collected_in_document_order() {
    let raw = b"From: a@x.com\r\n\
        Subject: nested\r\n\
        MIME-Version: 1.0\r\n\
        Content-Type: multipart/mixed; boundary=\"outer\"\r\n\
        \r\n\
        --outer\r\n\
        Content-Type: multipart/alternative; boundary=\"inner\"\r\n\
        \r\n\
        --inner\r\n\
        Content-Type: text/plain\r\n\
        \r\n\
        body\r\n\
        --inner\r\n\
        Content-Type: application/zip; name=\"first.zip\"\r\n\
        \r\n\
        zip1\r\n\
        --inner--\r\n\
        --outer\r\n\
        Content-Type: application/zip; name=\"second.zip\"\r\n\
        \r\n\
        zip2\r\n\
        --outer--\r\n";

    let records = collect_attachments(&decode_tree(raw), &ParserConfig::default());
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["first.zip", "second.zip"]);
}

// --- payload handling ---

#[test]
fn test_suppressed_decoding_keeps_wire_bytes_and_label() {
    let raw = mixed_message(
        "Content-Type: application/pdf; name=\"y.pdf\"\r\n\
         Content-Transfer-Encoding: base64",
        "aGVsbG8=",
    );
    let config = ParserConfig {
        decode_bodies: false,
        ..ParserConfig::default()
    };

    let parsed = mailparse::parse_mail(&raw).unwrap();
    let tree = MimeNode::from_parsed(&parsed, false).unwrap();
    let records = collect_attachments(&tree, &config);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].encoding.as_deref(), Some("base64"));
    assert!(records[0].data.starts_with(b"aGVsbG8="));
}

// --- record integration ---

#[test]
fn test_attachments_present_only_when_capture_enabled() {
    let raw = mixed_message(
        "Content-Type: image/png\r\n\
         Content-Disposition: attachment; filename=\"x.png\"",
        "png",
    );

    let with = parse_email(&raw, &ParserConfig::default(), &NoLookup).unwrap();
    assert_eq!(with.attachments.as_ref().map(Vec::len), Some(1));

    let config = ParserConfig {
        capture_attachments: false,
        ..ParserConfig::default()
    };
    let without = parse_email(&raw, &config, &NoLookup).unwrap();
    assert!(without.attachments.is_none());
}

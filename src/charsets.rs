//! Charset transcoding over encoding_rs

/// Convert `bytes` from one labeled charset to another.
///
/// Unknown source labels leave the input untouched; an unknown target
/// label yields UTF-8.
#[must_use]
pub fn transcode(bytes: &[u8], from: &str, to: &str) -> Vec<u8> {
    let Some(from_enc) = encoding_rs::Encoding::for_label(from.trim().as_bytes()) else {
        return bytes.to_vec();
    };
    let (text, _, _) = from_enc.decode(bytes);
    match encoding_rs::Encoding::for_label(to.trim().as_bytes()) {
        Some(to_enc) => {
            let (out, _, _) = to_enc.encode(&text);
            out.into_owned()
        }
        None => text.into_owned().into_bytes(),
    }
}

/// Decode part bytes to text using the declared charset label,
/// falling back to lossy UTF-8.
#[must_use]
pub fn decode_text(bytes: &[u8], charset: Option<&str>) -> String {
    match charset.and_then(|label| encoding_rs::Encoding::for_label(label.trim().as_bytes())) {
        Some(enc) => enc.decode(bytes).0.into_owned(),
        None => String::from_utf8_lossy(bytes).into_owned(),
    }
}

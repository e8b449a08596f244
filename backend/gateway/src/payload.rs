//! Image payload decoding: optional data-URI header, then Base64.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ApiError;

static DATA_URI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^data:image/\w+;base64,").unwrap());

/// Standard alphabet, padding optional, stray trailing bits tolerated.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Remove a leading `data:image/<type>;base64,` header if present.
pub fn strip_data_uri(image: &str) -> &str {
    match DATA_URI_RE.find(image) {
        Some(header) => &image[header.end()..],
        None => image,
    }
}

/// Decode the request's `image` field into raw bytes.
///
/// ASCII whitespace (line-wrapped Base64) is ignored. The bytes themselves
/// are not inspected.
pub fn decode_image(image: &str) -> Result<Vec<u8>, ApiError> {
    let body = strip_data_uri(image.trim());
    let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = LENIENT_STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ApiError::InvalidImage(e.to_string()))?;
    if bytes.is_empty() {
        return Err(ApiError::InvalidImage("image is empty".into()));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    #[test]
    fn strips_data_uri_header() {
        assert_eq!(strip_data_uri("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_uri("data:image/jpeg;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_uri("QUJD"), "QUJD");
        // Only image types are recognised.
        assert_eq!(
            strip_data_uri("data:text/plain;base64,QUJD"),
            "data:text/plain;base64,QUJD"
        );
    }

    #[test]
    fn decodes_plain_and_prefixed_payloads() {
        let encoded = STANDARD.encode(b"\x89PNG fake");
        assert_eq!(decode_image(&encoded).unwrap(), b"\x89PNG fake");
        let prefixed = format!("data:image/png;base64,{encoded}");
        assert_eq!(decode_image(&prefixed).unwrap(), b"\x89PNG fake");
    }

    #[test]
    fn tolerates_missing_padding_and_line_breaks() {
        assert_eq!(decode_image("QUJDRA").unwrap(), b"ABCD");
        assert_eq!(decode_image("QUJD\nRA==\n").unwrap(), b"ABCD");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            decode_image("not base64 at all!"),
            Err(ApiError::InvalidImage(_))
        ));
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(matches!(
            decode_image("data:image/png;base64,"),
            Err(ApiError::InvalidImage(_))
        ));
    }
}

/*!
 * Character encoding detection and strict decoding
 */

use std::path::Path;

use chardetng::EncodingDetector;
use content_inspector::ContentType;
use encoding_rs::Encoding;

use crate::error::{ExportError, Result};

/// Label used when the bytes give no usable hint (empty or binary-looking input)
pub const FALLBACK_ENCODING: &str = "utf-8";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Guess the text encoding of a file's full byte content.
///
/// The result is only ever used to pick a decoder; no confidence is reported.
pub fn detect(bytes: &[u8]) -> &'static str {
    if bytes.is_empty() {
        return FALLBACK_ENCODING;
    }
    if bytes.is_ascii() {
        return "ascii";
    }

    match content_inspector::inspect(bytes) {
        ContentType::BINARY => FALLBACK_ENCODING,
        ContentType::UTF_8_BOM => "utf-8-sig",
        ContentType::UTF_16LE => "utf-16le",
        ContentType::UTF_16BE => "utf-16be",
        ContentType::UTF_32LE => "utf-32le",
        ContentType::UTF_32BE => "utf-32be",
        ContentType::UTF_8 if std::str::from_utf8(bytes).is_ok() => "utf-8",
        ContentType::UTF_8 => {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, false).name()
        }
    }
}

/// Decode `bytes` under `label` without substituting replacement characters.
///
/// Malformed input yields [`ExportError::Decode`] for `path`.
pub fn decode(path: &Path, bytes: &[u8], label: &'static str) -> Result<String> {
    let malformed = || ExportError::Decode {
        path: path.to_path_buf(),
        encoding: label,
    };

    match label {
        "ascii" => {
            if !bytes.is_ascii() {
                return Err(malformed());
            }
            String::from_utf8(bytes.to_vec()).map_err(|_| malformed())
        }
        "utf-8-sig" => {
            let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            String::from_utf8(body.to_vec()).map_err(|_| malformed())
        }
        "utf-32le" | "utf-32be" => {
            decode_utf32(bytes, label == "utf-32le").ok_or_else(malformed)
        }
        _ => {
            let encoding = Encoding::for_label(label.as_bytes())
                .ok_or_else(|| ExportError::UnknownEncoding(label.to_string()))?;
            let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
            if had_errors {
                return Err(malformed());
            }
            Ok(text.into_owned())
        }
    }
}

fn decode_utf32(bytes: &[u8], little_endian: bool) -> Option<String> {
    if bytes.len() % 4 != 0 {
        return None;
    }

    let units = bytes.chunks_exact(4).map(|chunk| {
        let raw = [chunk[0], chunk[1], chunk[2], chunk[3]];
        if little_endian {
            u32::from_le_bytes(raw)
        } else {
            u32::from_be_bytes(raw)
        }
    });

    let mut text = String::with_capacity(bytes.len() / 4);
    let mut first = true;
    for unit in units {
        // Drop the byte order mark
        if std::mem::take(&mut first) && unit == 0xFEFF {
            continue;
        }
        text.push(char::from_u32(unit)?);
    }
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_detected(bytes: &[u8]) -> Result<String> {
        decode(Path::new("sample"), bytes, detect(bytes))
    }

    #[test]
    fn test_detect_plain_labels() {
        assert_eq!(detect(b""), FALLBACK_ENCODING);
        assert_eq!(detect(b"fn main() {}\n"), "ascii");
        assert_eq!(detect("héllo wörld".as_bytes()), "utf-8");
        assert_eq!(detect(b"\xEF\xBB\xBFhello \xC3\xA9"), "utf-8-sig");
        assert_eq!(detect(b"\xFF\xFEh\x00i\x00"), "utf-16le");
    }

    #[test]
    fn test_detect_legacy_single_byte() {
        // "café au lait, naïve résumé" in Latin-1
        let bytes = b"caf\xE9 au lait, na\xEFve r\xE9sum\xE9 et cr\xE8me br\xFBl\xE9e";
        let label = detect(bytes);
        assert!(label != "utf-8" && label != "ascii");
        let text = decode_detected(bytes).unwrap();
        assert!(text.starts_with("café"));
    }

    #[test]
    fn test_decode_strips_boms() {
        assert_eq!(decode_detected(b"\xEF\xBB\xBFabc").unwrap(), "abc");
        assert_eq!(decode_detected(b"\xFF\xFEh\x00i\x00").unwrap(), "hi");
        assert_eq!(
            decode(Path::new("wide"), b"\x00\x00\xFE\xFF\x00\x00\x00h", "utf-32be").unwrap(),
            "h"
        );
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        let err = decode(Path::new("bad.txt"), b"caf\xE9", "utf-8").unwrap_err();
        assert!(matches!(err, ExportError::Decode { encoding: "utf-8", .. }));

        let err = decode(Path::new("bad.txt"), b"caf\xE9", "ascii").unwrap_err();
        assert!(matches!(err, ExportError::Decode { encoding: "ascii", .. }));
    }

    #[test]
    fn test_binary_falls_back_and_fails_strictly() {
        let bytes = b"\x00\x9F\x92\x96\xFF\x00";
        assert_eq!(detect(bytes), FALLBACK_ENCODING);
        assert!(decode_detected(bytes).is_err());
    }

    #[test]
    fn test_unknown_label() {
        let err = decode(Path::new("x"), b"abc", "no-such-encoding").unwrap_err();
        assert!(matches!(err, ExportError::UnknownEncoding(_)));
    }
}

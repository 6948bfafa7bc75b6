//! Turns raw file bytes into text.
//!
//! Byte-order marks win outright and valid UTF-8 is taken as-is. Of the
//! rest, binary content is rejected and anything else goes through
//! `chardetng`'s statistical guess, falling back to UTF-8 when the guess is
//! not confident.

use crate::error::DecodeError;
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8, UTF_16LE};
use log::debug;

/// Text produced by [`decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Name of the encoding the bytes were read as.
    pub encoding: &'static str,
    /// Set when malformed sequences were replaced with U+FFFD.
    pub lossy: bool,
}

impl Decoded {
    fn new(text: String, encoding: &'static str, lossy: bool) -> Self {
        Self {
            text,
            encoding,
            lossy,
        }
    }
}

const UTF_32LE_BOM: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];
const UTF_32BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];

/// Detects the encoding of `bytes` and decodes them.
pub fn decode(bytes: &[u8]) -> Result<Decoded, DecodeError> {
    if bytes.is_empty() {
        return Ok(Decoded::new(String::new(), UTF_8.name(), false));
    }

    // Checked before the UTF-16 BOMs: FF FE 00 00 also starts with FF FE.
    if let Some(body) = bytes.strip_prefix(&UTF_32LE_BOM) {
        // A UTF-16LE text starting with U+0000 carries the same four bytes.
        return decode_utf32(body, u32::from_le_bytes, "UTF-32LE")
            .or_else(|_| Ok(decode_with(UTF_16LE, &bytes[2..])));
    }
    if let Some(body) = bytes.strip_prefix(&UTF_32BE_BOM) {
        return decode_utf32(body, u32::from_be_bytes, "UTF-32BE");
    }

    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        debug!("byte-order mark selects {}", encoding.name());
        return Ok(decode_with(encoding, &bytes[bom_len..]));
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Decoded::new(text.to_owned(), UTF_8.name(), false));
    }

    if content_inspector::inspect(bytes).is_binary() {
        return Err(DecodeError::Binary);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let (guess, confident) = detector.guess_assess(None, false);
    Ok(decode_guessed(bytes, guess, confident))
}

/// Decodes non-UTF-8 bytes with the detector's guess, or with UTF-8 when the
/// guess is not confident.
fn decode_guessed(bytes: &[u8], guess: &'static Encoding, confident: bool) -> Decoded {
    if confident {
        debug!("detected {}", guess.name());
        decode_with(guess, bytes)
    } else {
        debug!(
            "low confidence guess {}, falling back to {}",
            guess.name(),
            UTF_8.name()
        );
        decode_with(UTF_8, bytes)
    }
}

fn decode_with(encoding: &'static Encoding, body: &[u8]) -> Decoded {
    let (text, lossy) = encoding.decode_without_bom_handling(body);
    Decoded::new(text.into_owned(), encoding.name(), lossy)
}

fn decode_utf32(
    body: &[u8],
    to_u32: fn([u8; 4]) -> u32,
    encoding: &'static str,
) -> Result<Decoded, DecodeError> {
    let chunks = body.chunks_exact(4);
    if !chunks.remainder().is_empty() {
        return Err(DecodeError::Malformed { encoding });
    }

    let text = chunks
        .map(|unit| {
            let code = to_u32([unit[0], unit[1], unit[2], unit[3]]);
            char::from_u32(code).ok_or(DecodeError::Malformed { encoding })
        })
        .collect::<Result<String, _>>()?;

    Ok(Decoded::new(text, encoding, false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_empty_utf8() {
        let decoded = decode(b"").unwrap();
        assert_eq!(decoded.text, "");
        assert_eq!(decoded.encoding, "UTF-8");
        assert!(!decoded.lossy);
    }

    #[test]
    fn ascii_round_trips_exactly() {
        let input = "fn main() {\n    println!(\"hi\");\n}\n\ttabs ~ and {braces}";
        let decoded = decode(input.as_bytes()).unwrap();
        assert_eq!(decoded.text, input);
        assert_eq!(decoded.encoding, "UTF-8");
    }

    #[test]
    fn multibyte_utf8_is_kept() {
        let input = "naïve café — 日本語";
        assert_eq!(decode(input.as_bytes()).unwrap().text, input);
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let decoded = decode(b"\xEF\xBB\xBFhello").unwrap();
        assert_eq!(decoded.text, "hello");
        assert_eq!(decoded.encoding, "UTF-8");
    }

    #[test]
    fn utf16le_with_bom_is_decoded() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "héllo".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.text, "héllo");
        assert_eq!(decoded.encoding, "UTF-16LE");
    }

    #[test]
    fn utf16be_with_bom_is_decoded() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "abc".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode(&bytes).unwrap().text, "abc");
    }

    #[test]
    fn utf32le_with_bom_is_decoded() {
        let mut bytes = UTF_32LE_BOM.to_vec();
        for c in "ok✓".chars() {
            bytes.extend_from_slice(&(c as u32).to_le_bytes());
        }
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.text, "ok✓");
        assert_eq!(decoded.encoding, "UTF-32LE");
    }

    #[test]
    fn truncated_utf32_is_malformed() {
        let mut bytes = UTF_32BE_BOM.to_vec();
        bytes.extend_from_slice(&[0x00, 0x00, 0x00]);
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::Malformed {
                encoding: "UTF-32BE"
            })
        );
    }

    #[test]
    fn utf32_surrogate_is_malformed() {
        let mut bytes = UTF_32BE_BOM.to_vec();
        bytes.extend_from_slice(&0xD800u32.to_be_bytes());
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::Malformed {
                encoding: "UTF-32BE"
            })
        );
    }

    #[test]
    fn utf16le_starting_with_nul_is_not_mistaken_for_utf32() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "\0x".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(&bytes[..4], &UTF_32LE_BOM);

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.text, "\0x");
        assert_eq!(decoded.encoding, "UTF-16LE");
    }

    #[test]
    fn invalid_utf8_with_nul_bytes_is_binary() {
        let bytes = [0u8, 159, 146, 150, 0, 1];
        assert!(std::str::from_utf8(&bytes).is_err());
        assert_eq!(decode(&bytes), Err(DecodeError::Binary));
    }

    #[test]
    fn utf8_with_nul_bytes_round_trips() {
        let input = "col1\0col2\nrow";
        let decoded = decode(input.as_bytes()).unwrap();
        assert_eq!(decoded.text, input);
        assert_eq!(decode(b"a\0b").unwrap().text, "a\0b");
    }

    #[test]
    fn utf8_with_binary_magic_prefix_round_trips() {
        let input = "%PDF notes: plain text file";
        assert_eq!(decode(input.as_bytes()).unwrap().text, input);
        assert_eq!(decode(b"%PDF notes").unwrap().text, "%PDF notes");
    }

    #[test]
    fn windows_1252_text_is_decoded() {
        let bytes = b"Le caf\xe9 de la gare est ferm\xe9 le dimanche, mais en \xe9t\xe9 il ouvre t\xf4t et le g\xe9rant pr\xe9pare un cr\xe8me br\xfbl\xe9e.";
        let decoded = decode(bytes).unwrap();
        assert_eq!(
            decoded.text,
            "Le café de la gare est fermé le dimanche, mais en été il ouvre tôt et le gérant prépare un crème brûlée."
        );
        assert_eq!(decoded.encoding, "windows-1252");
        assert!(!decoded.lossy);
    }

    #[test]
    fn low_confidence_guess_falls_back_to_lossy_utf8() {
        let bytes = b"caf\xe9";
        let decoded = decode_guessed(bytes, encoding_rs::WINDOWS_1252, false);
        assert_eq!(decoded.text, "caf\u{FFFD}");
        assert_eq!(decoded.encoding, "UTF-8");
        assert!(decoded.lossy);

        let decoded = decode_guessed(bytes, encoding_rs::WINDOWS_1252, true);
        assert_eq!(decoded.text, "café");
        assert_eq!(decoded.encoding, "windows-1252");
        assert!(!decoded.lossy);
    }

    #[test]
    fn decoding_is_deterministic() {
        let bytes = b"r\xe9sum\xe9 and na\xefve";
        assert_eq!(decode(bytes).unwrap(), decode(bytes).unwrap());
    }
}

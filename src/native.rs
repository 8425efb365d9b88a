//! In-crate support for UTF-8, UTF-16, US-ASCII and ISO-8859-1
//!
//! `encoding_rs` follows the WHATWG Encoding Standard, which cannot encode to
//! UTF-16 and treats both `US-ASCII` and `ISO-8859-1` as labels for
//! windows-1252. These five encodings are therefore handled here.

use crate::Encoding;

/// Converter for one natively supported encoding
#[derive(Debug, Clone, Copy)]
pub(crate) struct Native {
    encoding: Encoding,
    substitute: char,
}

impl Native {
    /// Create a converter; `substitute` must be ASCII
    pub(crate) fn new(encoding: Encoding, substitute: char) -> Self {
        debug_assert!(substitute.is_ascii());
        Self {
            encoding,
            substitute,
        }
    }

    /// Check that `input` is well formed in this encoding
    pub(crate) fn is_valid(&self, input: &[u8]) -> bool {
        match self.encoding {
            Encoding::UTF8 => std::str::from_utf8(input).is_ok(),
            Encoding::UTF16LE | Encoding::UTF16BE => {
                input.len() % 2 == 0 && char::decode_utf16(self.code_units(input)).all(|r| r.is_ok())
            }
            Encoding::ASCII => input.is_ascii(),
            // Every byte value is assigned in Latin-1
            _ => true,
        }
    }

    /// Decode into Unicode, writing the substitute for malformed sequences
    pub(crate) fn decode(&self, input: &[u8]) -> String {
        match self.encoding {
            Encoding::UTF8 => {
                let mut output = String::with_capacity(input.len());
                for chunk in input.utf8_chunks() {
                    output.push_str(chunk.valid());
                    if !chunk.invalid().is_empty() {
                        output.push(self.substitute);
                    }
                }
                output
            }
            Encoding::UTF16LE | Encoding::UTF16BE => {
                let mut output: String = char::decode_utf16(self.code_units(input))
                    .map(|r| r.unwrap_or(self.substitute))
                    .collect();
                // Dangling odd byte
                if input.len() % 2 != 0 {
                    output.push(self.substitute);
                }
                output
            }
            Encoding::ASCII => input
                .iter()
                .map(|&byte| {
                    if byte.is_ascii() {
                        byte as char
                    } else {
                        self.substitute
                    }
                })
                .collect(),
            _ => input.iter().map(|&byte| char::from(byte)).collect(),
        }
    }

    /// Encode Unicode text, writing the substitute for unrepresentable characters
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        let substitute = self.substitute as u8;

        match self.encoding {
            Encoding::UTF8 => text.as_bytes().to_vec(),
            Encoding::UTF16LE => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Encoding::UTF16BE => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Encoding::ASCII => text
                .chars()
                .map(|ch| if ch.is_ascii() { ch as u8 } else { substitute })
                .collect(),
            _ => text
                .chars()
                .map(|ch| u8::try_from(ch).unwrap_or(substitute))
                .collect(),
        }
    }

    fn code_units<'a>(&self, input: &'a [u8]) -> impl Iterator<Item = u16> + 'a {
        let little_endian = matches!(self.encoding, Encoding::UTF16LE);
        input.chunks_exact(2).map(move |pair| {
            if little_endian {
                u16::from_le_bytes([pair[0], pair[1]])
            } else {
                u16::from_be_bytes([pair[0], pair[1]])
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn native(encoding: Encoding) -> Native {
        Native::new(encoding, '?')
    }

    #[test]
    fn test_utf8_validation() {
        let utf8 = native(Encoding::UTF8);
        assert!(utf8.is_valid("café 日本語".as_bytes()));
        assert!(!utf8.is_valid(&[b'c', b'a', 0xC3]));
        assert!(!utf8.is_valid(&[0xFF]));
    }

    #[test]
    fn test_utf8_decode_substitutes_malformed_sequences() {
        let utf8 = native(Encoding::UTF8);
        assert_eq!(utf8.decode(&[b'a', 0xFF, b'b']), "a?b");
        assert_eq!(utf8.decode("é".as_bytes()), "é");
    }

    #[test]
    fn test_ascii_encode_substitutes() {
        let ascii = native(Encoding::ASCII);
        assert_eq!(ascii.encode("café"), b"caf?");
        assert_eq!(ascii.encode("日本語"), b"???");
        assert_eq!(ascii.decode(b"caf?"), "caf?");
        assert!(ascii.is_valid(b"plain"));
        assert!(!ascii.is_valid(&[b'a', 0xE9]));
    }

    #[test]
    fn test_latin1_covers_first_256_code_points() {
        let latin1 = native(Encoding::ISO_8859_1);
        assert_eq!(latin1.encode("café"), &[b'c', b'a', b'f', 0xE9]);
        assert_eq!(latin1.encode("€"), b"?");
        assert_eq!(latin1.decode(&[0xE9, 0xFF]), "éÿ");
        assert!(latin1.is_valid(&[0x00, 0x80, 0xFF]));
    }

    #[test]
    fn test_utf16_both_endians() {
        let le = native(Encoding::UTF16LE);
        let be = native(Encoding::UTF16BE);

        assert_eq!(le.encode("Hi"), &[0x48, 0x00, 0x69, 0x00]);
        assert_eq!(be.encode("Hi"), &[0x00, 0x48, 0x00, 0x69]);
        assert_eq!(le.decode(&le.encode("Hello 🌍!")), "Hello 🌍!");
        assert_eq!(be.decode(&be.encode("日本語")), "日本語");
    }

    #[test]
    fn test_utf16_validation() {
        let le = native(Encoding::UTF16LE);
        assert!(le.is_valid(&[0x48, 0x00]));
        // Odd length
        assert!(!le.is_valid(&[0x48, 0x00, 0x69]));
        // Lone high surrogate
        assert!(!le.is_valid(&[0x3D, 0xD8]));
        assert_eq!(le.decode(&[0x3D, 0xD8, 0x41, 0x00]), "?A");
        assert_eq!(le.decode(&[0x41, 0x00, 0x42]), "A?");
    }
}

//! Conversion capability behind the diagnoser
//!
//! [`Codec`] is the seam between the loss-detection logic and whatever
//! actually knows the encoding tables. [`StandardCodec`] is the default
//! implementation; tests and embedders can supply their own.

use encoding_rs::{DecoderResult, EncoderResult};
use tracing::trace;

use crate::encoding::Backend;
use crate::native::Native;
use crate::{Encoding, EncodingRole, Error, Result};

/// Character written in place of anything the target encoding cannot represent
pub const DEFAULT_SUBSTITUTE: char = '?';

/// A named-encoding conversion capability
///
/// Conversions are lossy in the same way as classic transcoding tools:
/// characters the target cannot represent become a substitute character
/// instead of failing the whole conversion.
pub trait Codec {
    /// Canonical names of every encoding this codec supports
    fn encodings(&self) -> Vec<String>;

    /// Check whether `name` refers to a supported encoding
    ///
    /// The default is exact membership in [`Codec::encodings`].
    /// Implementations may accept more spellings than they list:
    /// [`StandardCodec`] also resolves aliases such as `ascii` or `cp1252`,
    /// ignoring case and surrounding whitespace.
    fn is_supported(&self, name: &str) -> bool {
        self.encodings().iter().any(|known| known == name)
    }

    /// Check that `input` is well formed under `encoding`
    ///
    /// Unsupported encodings are never valid.
    fn is_valid(&self, input: &[u8], encoding: &str) -> bool;

    /// Like [`Codec::is_valid`], but as a `Result`
    fn validate(&self, input: &[u8], encoding: &str) -> Result<()> {
        if self.is_valid(input, encoding) {
            Ok(())
        } else {
            Err(Error::InvalidInput {
                encoding: encoding.to_string(),
            })
        }
    }

    /// Decode `input` into Unicode text
    fn decode(&self, input: &[u8], encoding: &str) -> Result<String>;

    /// Convert `input` from one encoding to another
    fn convert(&self, input: &[u8], from: &str, to: &str) -> Result<Vec<u8>>;

    /// Convert `from` → `to` → `from`
    ///
    /// A single forward conversion hides substitutions that happen to be
    /// readable; converting back makes every altered position comparable to
    /// the original.
    fn round_trip(&self, input: &[u8], from: &str, to: &str) -> Result<Vec<u8>> {
        let forward = self.convert(input, from, to)?;
        self.convert(&forward, to, from)
    }
}

impl<C: Codec + ?Sized> Codec for &C {
    fn encodings(&self) -> Vec<String> {
        (**self).encodings()
    }

    fn is_supported(&self, name: &str) -> bool {
        (**self).is_supported(name)
    }

    fn is_valid(&self, input: &[u8], encoding: &str) -> bool {
        (**self).is_valid(input, encoding)
    }

    fn validate(&self, input: &[u8], encoding: &str) -> Result<()> {
        (**self).validate(input, encoding)
    }

    fn decode(&self, input: &[u8], encoding: &str) -> Result<String> {
        (**self).decode(input, encoding)
    }

    fn convert(&self, input: &[u8], from: &str, to: &str) -> Result<Vec<u8>> {
        (**self).convert(input, from, to)
    }

    fn round_trip(&self, input: &[u8], from: &str, to: &str) -> Result<Vec<u8>> {
        (**self).round_trip(input, from, to)
    }
}

/// Codec over [`Encoding`], backed by `encoding_rs` and the native module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardCodec {
    substitute: char,
}

impl Default for StandardCodec {
    fn default() -> Self {
        Self {
            substitute: DEFAULT_SUBSTITUTE,
        }
    }
}

impl StandardCodec {
    /// Create a codec using [`DEFAULT_SUBSTITUTE`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different substitute character
    ///
    /// The substitute must be ASCII so that every supported encoding can
    /// represent it.
    pub fn with_substitute(mut self, substitute: char) -> Result<Self> {
        if !substitute.is_ascii() {
            return Err(Error::InvalidSubstitute(substitute));
        }
        self.substitute = substitute;
        Ok(self)
    }

    /// The configured substitute character
    pub fn substitute(&self) -> char {
        self.substitute
    }

    /// Check that `input` is well formed under `encoding`
    pub fn is_valid_in(&self, input: &[u8], encoding: Encoding) -> bool {
        match encoding.backend() {
            Backend::Native => Native::new(encoding, self.substitute).is_valid(input),
            Backend::Legacy(legacy) => legacy
                .decode_without_bom_handling_and_without_replacement(input)
                .is_some(),
        }
    }

    /// Decode `input` from `encoding` into Unicode text
    pub fn decode_from(&self, input: &[u8], encoding: Encoding) -> String {
        match encoding.backend() {
            Backend::Native => Native::new(encoding, self.substitute).decode(input),
            Backend::Legacy(legacy) => decode_legacy(legacy, input, self.substitute),
        }
    }

    /// Encode Unicode `text` into `encoding`
    pub fn encode_to(&self, text: &str, encoding: Encoding) -> Vec<u8> {
        match encoding.backend() {
            Backend::Native => Native::new(encoding, self.substitute).encode(text),
            Backend::Legacy(legacy) => encode_legacy(legacy, text, self.substitute),
        }
    }

    /// Convert `input` between two encodings via Unicode
    pub fn transcode(&self, input: &[u8], from: Encoding, to: Encoding) -> Vec<u8> {
        let text = self.decode_from(input, from);
        let output = self.encode_to(&text, to);
        trace!(
            from = from.name(),
            to = to.name(),
            bytes_in = input.len(),
            bytes_out = output.len(),
            "transcoded"
        );
        output
    }

    fn resolve(name: &str) -> Result<Encoding> {
        Encoding::from_name(name).ok_or_else(|| Error::UnsupportedEncoding {
            name: name.to_string(),
            role: EncodingRole::Any,
        })
    }
}

impl Codec for StandardCodec {
    fn encodings(&self) -> Vec<String> {
        Encoding::ALL.iter().map(|e| e.name().to_string()).collect()
    }

    /// Any alias [`Encoding::from_name`] accepts, not only the listed names
    fn is_supported(&self, name: &str) -> bool {
        Encoding::from_name(name).is_some()
    }

    fn is_valid(&self, input: &[u8], encoding: &str) -> bool {
        Encoding::from_name(encoding).is_some_and(|e| self.is_valid_in(input, e))
    }

    fn decode(&self, input: &[u8], encoding: &str) -> Result<String> {
        Ok(self.decode_from(input, Self::resolve(encoding)?))
    }

    fn convert(&self, input: &[u8], from: &str, to: &str) -> Result<Vec<u8>> {
        let from = Self::resolve(from)?;
        let to = Self::resolve(to)?;
        Ok(self.transcode(input, from, to))
    }
}

fn decode_legacy(encoding: &'static encoding_rs::Encoding, input: &[u8], substitute: char) -> String {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut output = String::with_capacity(
        decoder
            .max_utf8_buffer_length_without_replacement(input.len())
            .unwrap_or(input.len()),
    );

    let mut remaining = input;
    loop {
        let (result, read) = decoder.decode_to_string_without_replacement(remaining, &mut output, true);
        remaining = &remaining[read..];
        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::OutputFull => {
                let needed = decoder
                    .max_utf8_buffer_length_without_replacement(remaining.len())
                    .unwrap_or(remaining.len());
                output.reserve(needed.max(16));
            }
            DecoderResult::Malformed(_, _) => output.push(substitute),
        }
    }

    output
}

fn encode_legacy(encoding: &'static encoding_rs::Encoding, text: &str, substitute: char) -> Vec<u8> {
    let mut encoder = encoding.new_encoder();
    let mut output = Vec::with_capacity(
        encoder
            .max_buffer_length_from_utf8_without_replacement(text.len())
            .unwrap_or(text.len()),
    );

    let mut buf = [0u8; 4];
    let replacement: &str = substitute.encode_utf8(&mut buf);

    let mut remaining = text;
    loop {
        let (result, read) =
            encoder.encode_from_utf8_to_vec_without_replacement(remaining, &mut output, true);
        remaining = &remaining[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {
                let needed = encoder
                    .max_buffer_length_from_utf8_without_replacement(remaining.len())
                    .unwrap_or(remaining.len());
                output.reserve(needed.max(16));
            }
            EncoderResult::Unmappable(_) => {
                // Room for a stateful escape sequence plus the substitute byte
                output.reserve(8);
                let (substituted, _) = encoder.encode_from_utf8_to_vec_without_replacement(
                    replacement,
                    &mut output,
                    false,
                );
                // An ASCII substitute is mappable everywhere and fits the reserve
                debug_assert!(matches!(substituted, EncoderResult::InputEmpty));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_names() {
        let codec = StandardCodec::new();
        assert!(codec.is_supported("UTF-8"));
        assert!(codec.is_supported("ascii"));
        assert!(codec.is_supported("Shift_JIS"));
        assert!(!codec.is_supported("UTF-7"));
        assert_eq!(codec.encodings().len(), Encoding::ALL.len());
        assert!(codec.encodings().contains(&"Windows-1252".to_string()));
    }

    #[test]
    fn test_validate_against_source_encoding() {
        let codec = StandardCodec::new();
        assert!(codec.validate("café".as_bytes(), "UTF-8").is_ok());
        assert_eq!(
            codec.validate(&[0xC3, 0x28], "UTF-8"),
            Err(Error::InvalidInput {
                encoding: "UTF-8".to_string()
            })
        );
        // Lone lead byte in Shift_JIS
        assert!(!codec.is_valid(&[0x82], "Shift_JIS"));
        assert!(codec.is_valid(&[0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA], "Shift_JIS"));
        assert!(!codec.is_valid(b"abc", "NOT-AN-ENCODING"));
    }

    #[test]
    fn test_unsupported_names_fail_conversion() {
        let codec = StandardCodec::new();
        let err = codec.convert(b"abc", "UTF-8", "EBCDIC").unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedEncoding {
                name: "EBCDIC".to_string(),
                role: EncodingRole::Any,
            }
        );
    }

    #[test]
    fn test_round_trip_to_ascii_substitutes() {
        let codec = StandardCodec::new();
        let double = codec.round_trip("café".as_bytes(), "UTF-8", "ASCII").unwrap();
        assert_eq!(double, b"caf?");
    }

    #[test]
    fn test_round_trip_to_windows_1252_keeps_latin() {
        let codec = StandardCodec::new();
        let input = "café €5 ™".as_bytes();
        let double = codec.round_trip(input, "UTF-8", "Windows-1252").unwrap();
        assert_eq!(double, input);
    }

    #[test]
    fn test_round_trip_to_windows_1252_loses_cjk() {
        let codec = StandardCodec::new();
        let double = codec.round_trip("a日b".as_bytes(), "UTF-8", "CP1252").unwrap();
        assert_eq!(double, b"a?b");
    }

    #[test]
    fn test_shift_jis_decode() {
        let codec = StandardCodec::new();
        let text = codec
            .decode(&[0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA], "Shift_JIS")
            .unwrap();
        assert_eq!(text, "日本語");
    }

    #[test]
    fn test_legacy_decode_substitutes_malformed() {
        let codec = StandardCodec::new();
        let text = codec.decode(&[b'a', 0x82], "Shift_JIS").unwrap();
        assert_eq!(text, "a?");
    }

    #[test]
    fn test_iso_2022_jp_substitute_returns_to_ascii() {
        let codec = StandardCodec::new();
        let bytes = codec.encode_to("日é本", Encoding::ISO_2022_JP);
        assert_eq!(codec.decode_from(&bytes, Encoding::ISO_2022_JP), "日?本");
    }

    #[test]
    fn test_long_unmappable_runs_substitute_each_character() {
        let codec = StandardCodec::new();
        let text = "日本語".repeat(200);
        let expected = "?".repeat(600);

        let bytes = codec.encode_to(&text, Encoding::WINDOWS_1252);
        assert_eq!(bytes, expected.as_bytes());

        // Stateful target: each substitute needs an escape back to ASCII
        let text = format!("日{}本", "é".repeat(300));
        let bytes = codec.encode_to(&text, Encoding::ISO_2022_JP);
        assert_eq!(
            codec.decode_from(&bytes, Encoding::ISO_2022_JP),
            format!("日{}本", "?".repeat(300))
        );
    }

    #[test]
    fn test_alias_names_are_supported_beyond_the_listing() {
        let codec = StandardCodec::new();
        let listed = codec.encodings();
        assert!(listed.contains(&"US-ASCII".to_string()));
        assert!(!listed.contains(&"ascii".to_string()));
        assert!(codec.is_supported("ascii"));
        assert!(codec.is_supported("  cp1252 "));
    }

    #[test]
    fn test_custom_substitute() {
        let codec = StandardCodec::new().with_substitute('_').unwrap();
        assert_eq!(codec.substitute(), '_');
        assert_eq!(codec.convert("né".as_bytes(), "UTF-8", "ASCII").unwrap(), b"n_");
        assert_eq!(
            StandardCodec::new().with_substitute('é'),
            Err(Error::InvalidSubstitute('é'))
        );
    }

    #[test]
    fn test_codec_through_reference() {
        let codec = StandardCodec::new();
        let borrowed: &dyn Codec = &codec;
        assert!(borrowed.is_supported("latin1"));
        assert_eq!(
            (&codec).round_trip(b"plain", "UTF-8", "ASCII").unwrap(),
            b"plain"
        );
    }
}

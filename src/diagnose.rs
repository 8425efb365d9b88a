//! Round-trip loss detection
//!
//! A [`Diagnoser`] converts its input to the target encoding and back, then
//! compares the result with the original one character at a time. Every
//! maximal run of adjacent differing positions becomes a [`LossChunk`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::codec::{Codec, StandardCodec};
use crate::{EncodingRole, Error, Result};

/// A contiguous run of characters that would not survive re-encoding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LossChunk {
    /// Character offset of the first lost character in the original text
    pub start_pos: usize,
    /// The original characters, before conversion
    pub characters: String,
    /// Number of characters in `characters`
    pub length: usize,
}

impl LossChunk {
    /// Character offset one past the last lost character
    pub fn end_pos(&self) -> usize {
        self.start_pos + self.length
    }
}

/// Detects data loss between a fixed pair of encodings
///
/// Both encodings are validated once at construction; the diagnoser is
/// immutable afterwards and can be shared between threads.
#[derive(Debug, Clone)]
pub struct Diagnoser<C = StandardCodec> {
    codec: C,
    from: String,
    to: String,
}

impl Diagnoser<StandardCodec> {
    /// Create a diagnoser backed by the default [`StandardCodec`]
    ///
    /// ```rust
    /// use encoding_loss::Diagnoser;
    ///
    /// let diagnoser = Diagnoser::new("UTF-8", "ASCII").unwrap();
    /// let chunks = diagnoser.diagnose("café").unwrap();
    /// assert_eq!(chunks.len(), 1);
    /// assert_eq!(chunks[0].start_pos, 3);
    /// assert_eq!(chunks[0].characters, "é");
    /// ```
    pub fn new(from: &str, to: &str) -> Result<Self> {
        Self::with_codec(StandardCodec::default(), from, to)
    }
}

impl<C: Codec> Diagnoser<C> {
    /// Create a diagnoser on top of an arbitrary codec
    pub fn with_codec(codec: C, from: &str, to: &str) -> Result<Self> {
        if !codec.is_supported(from) {
            return Err(Error::UnsupportedEncoding {
                name: from.to_string(),
                role: EncodingRole::From,
            });
        }
        if !codec.is_supported(to) {
            return Err(Error::UnsupportedEncoding {
                name: to.to_string(),
                role: EncodingRole::To,
            });
        }

        debug!(from, to, "diagnoser created");

        Ok(Self {
            codec,
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// Source encoding name
    pub fn from_encoding(&self) -> &str {
        &self.from
    }

    /// Target encoding name
    pub fn to_encoding(&self) -> &str {
        &self.to
    }

    /// The codec used for validation and conversion
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Find every run of characters in `input` that re-encoding would alter
    ///
    /// `input` holds bytes in the source encoding. Fails with
    /// [`Error::InvalidInput`] before any conversion if they are malformed.
    /// An empty result means the text survives the conversion intact.
    pub fn diagnose(&self, input: impl AsRef<[u8]>) -> Result<Vec<LossChunk>> {
        let input = input.as_ref();
        self.codec.validate(input, &self.from)?;

        let test_double = self.codec.round_trip(input, &self.from, &self.to)?;

        let original = self.codec.decode(input, &self.from)?;
        let test_double = self.codec.decode(&test_double, &self.from)?;

        let original_len = original.chars().count();
        let double_len = test_double.chars().count();
        if original_len != double_len {
            warn!(
                from = %self.from,
                to = %self.to,
                original_len,
                double_len,
                "round trip changed the character count, positions after the change may be misreported"
            );
        }

        let chunks = chunked_diff(&original, &test_double);

        debug!(
            from = %self.from,
            to = %self.to,
            characters = original_len,
            chunks = chunks.len(),
            "diagnosis complete"
        );

        Ok(chunks)
    }

    /// Check whether `input` survives the conversion without any loss
    pub fn is_lossless(&self, input: impl AsRef<[u8]>) -> Result<bool> {
        Ok(self.diagnose(input)?.is_empty())
    }

    /// See [`sub_string_wrap`](crate::sub_string_wrap)
    pub fn sub_string_wrap(&self, text: &str, chunks: &[LossChunk], pre: &str, post: &str) -> String {
        crate::wrap::sub_string_wrap(text, chunks, pre, post)
    }
}

/// Positional, character-level diff grouped into contiguous chunks
///
/// Position `i` of `original` is lost when `test_double` has a different
/// character there, or no character at all. Adjacent lost positions share a
/// chunk; any matching position in between starts a new one. Extra trailing
/// characters in `test_double` are ignored.
pub fn chunked_diff(original: &str, test_double: &str) -> Vec<LossChunk> {
    let mut chunks: Vec<LossChunk> = Vec::new();
    let mut last_mismatch: Option<usize> = None;
    let mut doubles = test_double.chars();

    for (pos, ch) in original.chars().enumerate() {
        if doubles.next() == Some(ch) {
            continue;
        }

        let contiguous = last_mismatch.is_some_and(|last| last + 1 == pos);
        match chunks.last_mut() {
            Some(chunk) if contiguous => {
                chunk.characters.push(ch);
                chunk.length += 1;
            }
            _ => chunks.push(LossChunk {
                start_pos: pos,
                characters: ch.to_string(),
                length: 1,
            }),
        }
        last_mismatch = Some(pos);
    }

    chunks
}

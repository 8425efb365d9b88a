//! # EncodingLoss - Re-encoding Data Loss Detection
//!
//! Finds exactly which characters of a text would be altered or lost if it
//! were converted to another character encoding, so callers can warn users
//! or highlight the affected substrings before the damage is done.
//!
//! ## How it works
//!
//! - **Round trip**: the text is converted to the target encoding and back.
//!   Converters often replace unsupported characters with something readable
//!   but different; converting back makes every such position comparable.
//! - **Positional diff**: original and round-tripped text are compared one
//!   character at a time.
//! - **Chunking**: adjacent differing positions are grouped into
//!   [`LossChunk`]s holding the original characters.
//!
//! ## Quick Start
//!
//! ```rust
//! use encoding_loss::{Diagnoser, sub_string_wrap};
//!
//! let diagnoser = Diagnoser::new("UTF-8", "ASCII").unwrap();
//!
//! let chunks = diagnoser.diagnose("日本語 café").unwrap();
//! assert_eq!(chunks[0].characters, "日本語");
//! assert_eq!(chunks[1].start_pos, 7);
//!
//! let marked = sub_string_wrap("café latte", &chunks, "<mark>", "</mark>");
//! assert_eq!(marked, "caf<mark>é</mark> latte");
//! ```

#![deny(missing_docs)]

use std::fmt;

pub mod codec;
mod diagnose;
mod encoding;
mod native;
mod wrap;

pub use codec::{Codec, DEFAULT_SUBSTITUTE, StandardCodec};
pub use diagnose::{Diagnoser, LossChunk, chunked_diff};
pub use encoding::Encoding;
pub use wrap::sub_string_wrap;

/// Result type for diagnosis operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which side of a conversion an encoding name was given for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingRole {
    /// The encoding the text is currently in
    From,
    /// The encoding the text would be converted to
    To,
    /// A name passed directly to a codec
    Any,
}

impl fmt::Display for EncodingRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingRole::From => f.write_str("source"),
            EncodingRole::To => f.write_str("target"),
            EncodingRole::Any => f.write_str("requested"),
        }
    }
}

/// Errors that can occur while diagnosing a conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Encoding name unknown to the codec
    UnsupportedEncoding {
        /// The name as given
        name: String,
        /// Where the name was used
        role: EncodingRole,
    },
    /// Input bytes are not well formed in the source encoding
    InvalidInput {
        /// The encoding the input was checked against
        encoding: String,
    },
    /// Substitute character every encoding could not represent
    InvalidSubstitute(char),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedEncoding { name, role } => {
                write!(f, "Unsupported {} encoding: {}", role, name)
            }
            Error::InvalidInput { encoding } => {
                write!(f, "Invalid input: not well-formed {}", encoding)
            }
            Error::InvalidSubstitute(ch) => {
                write!(f, "Substitute character '{}' must be ASCII", ch)
            }
        }
    }
}

impl std::error::Error for Error {}

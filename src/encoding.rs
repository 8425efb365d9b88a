//! Catalogue of the encodings the standard codec can evaluate
//!
//! Each variant knows its canonical name, the aliases accepted on lookup and
//! which backend performs the actual conversion.

use std::str::FromStr;

use crate::{EncodingRole, Error};

/// Supported character encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Encoding {
    // Unicode encodings
    /// UTF-8 Unicode encoding (variable length, 1-4 bytes)
    UTF8,
    /// UTF-16LE Unicode encoding (little endian)
    UTF16LE,
    /// UTF-16BE Unicode encoding (big endian)
    UTF16BE,

    // ASCII and Latin encodings
    /// ASCII (7-bit, 0-127)
    ASCII,
    /// ISO-8859-1 (Latin-1) - Western European
    ISO_8859_1,
    /// ISO-8859-2 (Latin-2) - Central/Eastern European
    ISO_8859_2,
    /// ISO-8859-3 (Latin-3) - South European
    ISO_8859_3,
    /// ISO-8859-4 (Latin-4) - North European
    ISO_8859_4,
    /// ISO-8859-5 (Cyrillic)
    ISO_8859_5,
    /// ISO-8859-6 (Arabic)
    ISO_8859_6,
    /// ISO-8859-7 (Greek)
    ISO_8859_7,
    /// ISO-8859-8 (Hebrew)
    ISO_8859_8,
    /// ISO-8859-10 (Latin-6) - Nordic
    ISO_8859_10,
    /// ISO-8859-13 (Latin-7) - Baltic Rim
    ISO_8859_13,
    /// ISO-8859-14 (Latin-8) - Celtic
    ISO_8859_14,
    /// ISO-8859-15 (Latin-9) - Western European with Euro
    ISO_8859_15,
    /// ISO-8859-16 (Latin-10) - South-Eastern European
    ISO_8859_16,

    // Windows code pages
    /// Windows-874 (Thai)
    WINDOWS_874,
    /// Windows-1250 (Central/Eastern European)
    WINDOWS_1250,
    /// Windows-1251 (Cyrillic)
    WINDOWS_1251,
    /// Windows-1252 (Western European)
    WINDOWS_1252,
    /// Windows-1253 (Greek)
    WINDOWS_1253,
    /// Windows-1254 (Turkish)
    WINDOWS_1254,
    /// Windows-1255 (Hebrew)
    WINDOWS_1255,
    /// Windows-1256 (Arabic)
    WINDOWS_1256,
    /// Windows-1257 (Baltic)
    WINDOWS_1257,
    /// Windows-1258 (Vietnamese)
    WINDOWS_1258,

    // Cyrillic
    /// DOS Code Page 866 (Russian OEM)
    CP_866,
    /// KOI8-R (Russian)
    KOI8_R,
    /// KOI8-U (Ukrainian)
    KOI8_U,

    // Mac encodings
    /// Macintosh Roman
    MAC_ROMAN,
    /// Macintosh Cyrillic
    MAC_CYRILLIC,

    // Asian encodings
    /// Shift-JIS (Japanese)
    SHIFT_JIS,
    /// EUC-JP (Japanese)
    EUC_JP,
    /// ISO-2022-JP (Japanese, stateful 7-bit)
    ISO_2022_JP,
    /// GBK (Simplified Chinese, superset of GB2312)
    GBK,
    /// GB18030 (Simplified Chinese, full Unicode coverage)
    GB18030,
    /// Big5 (Traditional Chinese)
    BIG5,
    /// EUC-KR (Korean)
    EUC_KR,
}

/// Where the conversion tables for an encoding live
#[derive(Debug, Clone, Copy)]
pub(crate) enum Backend {
    /// Handled in-crate by the `native` module
    Native,
    /// Delegated to `encoding_rs`
    Legacy(&'static encoding_rs::Encoding),
}

impl Encoding {
    /// Every supported encoding, in listing order
    pub const ALL: [Encoding; 39] = [
        Encoding::UTF8,
        Encoding::UTF16LE,
        Encoding::UTF16BE,
        Encoding::ASCII,
        Encoding::ISO_8859_1,
        Encoding::ISO_8859_2,
        Encoding::ISO_8859_3,
        Encoding::ISO_8859_4,
        Encoding::ISO_8859_5,
        Encoding::ISO_8859_6,
        Encoding::ISO_8859_7,
        Encoding::ISO_8859_8,
        Encoding::ISO_8859_10,
        Encoding::ISO_8859_13,
        Encoding::ISO_8859_14,
        Encoding::ISO_8859_15,
        Encoding::ISO_8859_16,
        Encoding::WINDOWS_874,
        Encoding::WINDOWS_1250,
        Encoding::WINDOWS_1251,
        Encoding::WINDOWS_1252,
        Encoding::WINDOWS_1253,
        Encoding::WINDOWS_1254,
        Encoding::WINDOWS_1255,
        Encoding::WINDOWS_1256,
        Encoding::WINDOWS_1257,
        Encoding::WINDOWS_1258,
        Encoding::CP_866,
        Encoding::KOI8_R,
        Encoding::KOI8_U,
        Encoding::MAC_ROMAN,
        Encoding::MAC_CYRILLIC,
        Encoding::SHIFT_JIS,
        Encoding::EUC_JP,
        Encoding::ISO_2022_JP,
        Encoding::GBK,
        Encoding::GB18030,
        Encoding::BIG5,
        Encoding::EUC_KR,
    ];

    /// Get the canonical name of this encoding
    pub fn name(self) -> &'static str {
        match self {
            // Unicode
            Encoding::UTF8 => "UTF-8",
            Encoding::UTF16LE => "UTF-16LE",
            Encoding::UTF16BE => "UTF-16BE",

            // ASCII and Latin
            Encoding::ASCII => "US-ASCII",
            Encoding::ISO_8859_1 => "ISO-8859-1",
            Encoding::ISO_8859_2 => "ISO-8859-2",
            Encoding::ISO_8859_3 => "ISO-8859-3",
            Encoding::ISO_8859_4 => "ISO-8859-4",
            Encoding::ISO_8859_5 => "ISO-8859-5",
            Encoding::ISO_8859_6 => "ISO-8859-6",
            Encoding::ISO_8859_7 => "ISO-8859-7",
            Encoding::ISO_8859_8 => "ISO-8859-8",
            Encoding::ISO_8859_10 => "ISO-8859-10",
            Encoding::ISO_8859_13 => "ISO-8859-13",
            Encoding::ISO_8859_14 => "ISO-8859-14",
            Encoding::ISO_8859_15 => "ISO-8859-15",
            Encoding::ISO_8859_16 => "ISO-8859-16",

            // Windows
            Encoding::WINDOWS_874 => "Windows-874",
            Encoding::WINDOWS_1250 => "Windows-1250",
            Encoding::WINDOWS_1251 => "Windows-1251",
            Encoding::WINDOWS_1252 => "Windows-1252",
            Encoding::WINDOWS_1253 => "Windows-1253",
            Encoding::WINDOWS_1254 => "Windows-1254",
            Encoding::WINDOWS_1255 => "Windows-1255",
            Encoding::WINDOWS_1256 => "Windows-1256",
            Encoding::WINDOWS_1257 => "Windows-1257",
            Encoding::WINDOWS_1258 => "Windows-1258",

            // Cyrillic
            Encoding::CP_866 => "CP866",
            Encoding::KOI8_R => "KOI8-R",
            Encoding::KOI8_U => "KOI8-U",

            // Mac
            Encoding::MAC_ROMAN => "MacRoman",
            Encoding::MAC_CYRILLIC => "MacCyrillic",

            // Asian
            Encoding::SHIFT_JIS => "Shift_JIS",
            Encoding::EUC_JP => "EUC-JP",
            Encoding::ISO_2022_JP => "ISO-2022-JP",
            Encoding::GBK => "GBK",
            Encoding::GB18030 => "GB18030",
            Encoding::BIG5 => "Big5",
            Encoding::EUC_KR => "EUC-KR",
        }
    }

    /// Look up an encoding by canonical name or alias, ignoring case
    pub fn from_name(name: &str) -> Option<Encoding> {
        let encoding = match name.trim().to_uppercase().as_str() {
            "UTF8" | "UTF-8" => Encoding::UTF8,
            "UTF16LE" | "UTF-16LE" => Encoding::UTF16LE,
            "UTF16BE" | "UTF-16BE" => Encoding::UTF16BE,
            "ASCII" | "US-ASCII" => Encoding::ASCII,

            // ISO-8859 series
            "ISO88591" | "ISO-8859-1" | "LATIN1" => Encoding::ISO_8859_1,
            "ISO88592" | "ISO-8859-2" | "LATIN2" => Encoding::ISO_8859_2,
            "ISO88593" | "ISO-8859-3" | "LATIN3" => Encoding::ISO_8859_3,
            "ISO88594" | "ISO-8859-4" | "LATIN4" => Encoding::ISO_8859_4,
            "ISO88595" | "ISO-8859-5" => Encoding::ISO_8859_5,
            "ISO88596" | "ISO-8859-6" => Encoding::ISO_8859_6,
            "ISO88597" | "ISO-8859-7" => Encoding::ISO_8859_7,
            "ISO88598" | "ISO-8859-8" => Encoding::ISO_8859_8,
            "ISO885910" | "ISO-8859-10" | "LATIN6" => Encoding::ISO_8859_10,
            "ISO885913" | "ISO-8859-13" | "LATIN7" => Encoding::ISO_8859_13,
            "ISO885914" | "ISO-8859-14" | "LATIN8" => Encoding::ISO_8859_14,
            "ISO885915" | "ISO-8859-15" | "LATIN9" => Encoding::ISO_8859_15,
            "ISO885916" | "ISO-8859-16" | "LATIN10" => Encoding::ISO_8859_16,

            // Windows code pages
            "WINDOWS874" | "WINDOWS-874" | "WIN874" | "CP874" => Encoding::WINDOWS_874,
            "WINDOWS1250" | "WINDOWS-1250" | "WIN1250" | "CP1250" => Encoding::WINDOWS_1250,
            "WINDOWS1251" | "WINDOWS-1251" | "WIN1251" | "CP1251" => Encoding::WINDOWS_1251,
            "WINDOWS1252" | "WINDOWS-1252" | "WIN1252" | "CP1252" => Encoding::WINDOWS_1252,
            "WINDOWS1253" | "WINDOWS-1253" | "WIN1253" | "CP1253" => Encoding::WINDOWS_1253,
            "WINDOWS1254" | "WINDOWS-1254" | "WIN1254" | "CP1254" => Encoding::WINDOWS_1254,
            "WINDOWS1255" | "WINDOWS-1255" | "WIN1255" | "CP1255" => Encoding::WINDOWS_1255,
            "WINDOWS1256" | "WINDOWS-1256" | "WIN1256" | "CP1256" => Encoding::WINDOWS_1256,
            "WINDOWS1257" | "WINDOWS-1257" | "WIN1257" | "CP1257" => Encoding::WINDOWS_1257,
            "WINDOWS1258" | "WINDOWS-1258" | "WIN1258" | "CP1258" => Encoding::WINDOWS_1258,

            // Cyrillic
            "CP866" | "DOS866" | "IBM866" => Encoding::CP_866,
            "KOI8R" | "KOI8-R" => Encoding::KOI8_R,
            "KOI8U" | "KOI8-U" => Encoding::KOI8_U,

            // Mac
            "MACROMAN" | "MAC-ROMAN" | "MACINTOSH" => Encoding::MAC_ROMAN,
            "MACCYRILLIC" | "MAC-CYRILLIC" | "X-MAC-CYRILLIC" => Encoding::MAC_CYRILLIC,

            // Asian
            "SHIFTJIS" | "SHIFT-JIS" | "SHIFT_JIS" | "SJIS" => Encoding::SHIFT_JIS,
            "EUCJP" | "EUC-JP" | "EUC_JP" => Encoding::EUC_JP,
            "ISO2022JP" | "ISO-2022-JP" => Encoding::ISO_2022_JP,
            "GBK" | "GB2312" | "CP936" => Encoding::GBK,
            "GB18030" => Encoding::GB18030,
            "BIG5" => Encoding::BIG5,
            "EUCKR" | "EUC-KR" | "EUC_KR" => Encoding::EUC_KR,

            _ => return None,
        };

        Some(encoding)
    }

    /// Check if this encoding is ASCII-compatible (ASCII bytes 0-127 have same meaning)
    pub fn is_ascii_compatible(self) -> bool {
        !matches!(
            self,
            Encoding::UTF16LE | Encoding::UTF16BE | Encoding::ISO_2022_JP
        )
    }

    /// Check if this encoding uses variable-length character representation
    pub fn is_multibyte(self) -> bool {
        matches!(
            self,
            Encoding::UTF8
                | Encoding::UTF16LE
                | Encoding::UTF16BE
                | Encoding::SHIFT_JIS
                | Encoding::EUC_JP
                | Encoding::ISO_2022_JP
                | Encoding::GBK
                | Encoding::GB18030
                | Encoding::BIG5
                | Encoding::EUC_KR
        )
    }

    /// Check if every Unicode scalar value survives a round trip through this encoding
    pub fn is_unicode(self) -> bool {
        matches!(
            self,
            Encoding::UTF8 | Encoding::UTF16LE | Encoding::UTF16BE | Encoding::GB18030
        )
    }

    /// Get the byte order mark (BOM) for this encoding if it has one
    pub fn bom(self) -> Option<&'static [u8]> {
        match self {
            Encoding::UTF8 => Some(&[0xEF, 0xBB, 0xBF]),
            Encoding::UTF16LE => Some(&[0xFF, 0xFE]),
            Encoding::UTF16BE => Some(&[0xFE, 0xFF]),
            _ => None,
        }
    }

    pub(crate) fn backend(self) -> Backend {
        let legacy = match self {
            Encoding::UTF8
            | Encoding::UTF16LE
            | Encoding::UTF16BE
            | Encoding::ASCII
            | Encoding::ISO_8859_1 => return Backend::Native,

            Encoding::ISO_8859_2 => encoding_rs::ISO_8859_2,
            Encoding::ISO_8859_3 => encoding_rs::ISO_8859_3,
            Encoding::ISO_8859_4 => encoding_rs::ISO_8859_4,
            Encoding::ISO_8859_5 => encoding_rs::ISO_8859_5,
            Encoding::ISO_8859_6 => encoding_rs::ISO_8859_6,
            Encoding::ISO_8859_7 => encoding_rs::ISO_8859_7,
            Encoding::ISO_8859_8 => encoding_rs::ISO_8859_8,
            Encoding::ISO_8859_10 => encoding_rs::ISO_8859_10,
            Encoding::ISO_8859_13 => encoding_rs::ISO_8859_13,
            Encoding::ISO_8859_14 => encoding_rs::ISO_8859_14,
            Encoding::ISO_8859_15 => encoding_rs::ISO_8859_15,
            Encoding::ISO_8859_16 => encoding_rs::ISO_8859_16,

            Encoding::WINDOWS_874 => encoding_rs::WINDOWS_874,
            Encoding::WINDOWS_1250 => encoding_rs::WINDOWS_1250,
            Encoding::WINDOWS_1251 => encoding_rs::WINDOWS_1251,
            Encoding::WINDOWS_1252 => encoding_rs::WINDOWS_1252,
            Encoding::WINDOWS_1253 => encoding_rs::WINDOWS_1253,
            Encoding::WINDOWS_1254 => encoding_rs::WINDOWS_1254,
            Encoding::WINDOWS_1255 => encoding_rs::WINDOWS_1255,
            Encoding::WINDOWS_1256 => encoding_rs::WINDOWS_1256,
            Encoding::WINDOWS_1257 => encoding_rs::WINDOWS_1257,
            Encoding::WINDOWS_1258 => encoding_rs::WINDOWS_1258,

            Encoding::CP_866 => encoding_rs::IBM866,
            Encoding::KOI8_R => encoding_rs::KOI8_R,
            Encoding::KOI8_U => encoding_rs::KOI8_U,

            Encoding::MAC_ROMAN => encoding_rs::MACINTOSH,
            Encoding::MAC_CYRILLIC => encoding_rs::X_MAC_CYRILLIC,

            Encoding::SHIFT_JIS => encoding_rs::SHIFT_JIS,
            Encoding::EUC_JP => encoding_rs::EUC_JP,
            Encoding::ISO_2022_JP => encoding_rs::ISO_2022_JP,
            Encoding::GBK => encoding_rs::GBK,
            Encoding::GB18030 => encoding_rs::GB18030,
            Encoding::BIG5 => encoding_rs::BIG5,
            Encoding::EUC_KR => encoding_rs::EUC_KR,
        };

        Backend::Legacy(legacy)
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::from_name(s).ok_or_else(|| Error::UnsupportedEncoding {
            name: s.to_string(),
            role: EncodingRole::Any,
        })
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

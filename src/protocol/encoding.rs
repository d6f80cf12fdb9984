//! # Text Encodings
//!
//! Converts Unicode strings to the byte encoding the printer expects.
//!
//! | Encoding | Coverage |
//! |----------|----------|
//! | `utf8`   | Everything (printer must be in UTF-8 mode) |
//! | `ascii`  | U+0000–U+007F |
//! | `cp437`  | ASCII plus the 128 IBM PC glyphs (accents, box drawing) |
//! | `gbk`    | ASCII plus simplified Chinese, via `encoding_rs` |
//!
//! Characters the target encoding cannot represent are an error; nothing is
//! replaced with `?`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TillrollError};

/// Printer text encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    #[default]
    Utf8,
    Ascii,
    Cp437,
    Gbk,
}

impl TextEncoding {
    /// Short lowercase name, as used in settings files and CLI flags.
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Ascii => "ascii",
            Self::Cp437 => "cp437",
            Self::Gbk => "gbk",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = TillrollError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "ascii" => Ok(Self::Ascii),
            "cp437" => Ok(Self::Cp437),
            "gbk" => Ok(Self::Gbk),
            other => Err(TillrollError::InvalidConfig(format!(
                "Unknown encoding '{}'. Use utf8, ascii, cp437 or gbk",
                other
            ))),
        }
    }
}

/// Encode a string for the given printer encoding.
///
/// ## Example
///
/// ```
/// use tillroll::protocol::encoding::{encode_text, TextEncoding};
///
/// assert_eq!(encode_text("Café", TextEncoding::Cp437).unwrap(), vec![0x43, 0x61, 0x66, 0x82]);
/// assert!(encode_text("Café", TextEncoding::Ascii).is_err());
/// ```
pub fn encode_text(s: &str, encoding: TextEncoding) -> Result<Vec<u8>> {
    match encoding {
        TextEncoding::Utf8 => Ok(s.as_bytes().to_vec()),
        TextEncoding::Ascii => {
            if let Some(ch) = s.chars().find(|c| !c.is_ascii()) {
                return Err(unencodable(ch, encoding));
            }
            Ok(s.as_bytes().to_vec())
        }
        TextEncoding::Cp437 => s
            .chars()
            .map(|ch| cp437_byte(ch).ok_or_else(|| unencodable(ch, encoding)))
            .collect(),
        TextEncoding::Gbk => encode_gbk(s),
    }
}

fn unencodable(character: char, encoding: TextEncoding) -> TillrollError {
    TillrollError::Encoding {
        character,
        encoding,
    }
}

// ============================================================================
// CODE PAGE 437
// ============================================================================

/// CP437 upper half, in byte order starting at 0x80.
const CP437_HIGH: &str = concat!(
    "ÇüéâäàåçêëèïîìÄÅ",
    "ÉæÆôöòûùÿÖÜ¢£¥₧ƒ",
    "áíóúñÑªº¿⌐¬½¼¡«»",
    "░▒▓│┤╡╢╖╕╣║╗╝╜╛┐",
    "└┴┬├─┼╞╟╚╔╩╦╠═╬╧",
    "╨╤╥╙╘╒╓╫╪┘┌█▄▌▐▀",
    "αßΓπΣσµτΦΘΩδ∞φε∩",
    "≡±≥≤⌠⌡÷≈°∙·√ⁿ²■\u{00A0}",
);

/// Map a character to its CP437 byte. ASCII passes through.
fn cp437_byte(ch: char) -> Option<u8> {
    if ch.is_ascii() {
        return Some(ch as u8);
    }
    CP437_HIGH
        .chars()
        .position(|c| c == ch)
        .map(|i| 0x80 + i as u8)
}

// ============================================================================
// GBK
// ============================================================================

fn encode_gbk(s: &str) -> Result<Vec<u8>> {
    let (bytes, _, had_errors) = encoding_rs::GBK.encode(s);
    if !had_errors {
        return Ok(bytes.into_owned());
    }

    // encoding_rs substitutes numeric character references on failure;
    // find the first character it could not map so the error can name it.
    let mut buf = [0u8; 4];
    let offending = s
        .chars()
        .find(|c| encoding_rs::GBK.encode(c.encode_utf8(&mut buf)).2)
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    Err(unencodable(offending, TextEncoding::Gbk))
}

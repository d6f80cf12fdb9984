//! # Code Generation
//!
//! Converts command sequences to ESC/POS bytes.

use tracing::debug;

use super::ops::Command;
use crate::error::Result;
use crate::protocol::encoding::{TextEncoding, encode_text};
use crate::protocol::{commands, text};

impl Command {
    /// Append this command's bytes to `out`.
    ///
    /// Only `Text` can fail, when the encoding cannot represent a character.
    pub fn encode_into(&self, out: &mut Vec<u8>, encoding: TextEncoding) -> Result<()> {
        match self {
            // ===== Printer Control =====
            Command::Init | Command::Reset => out.extend(commands::init()),
            Command::Cut => out.extend(commands::cut()),
            Command::FeedLine => out.extend(commands::feed_line()),
            Command::FeedLines(n) => out.extend(commands::feed_lines(*n)),
            Command::SetLineSpacing(spacing) => out.extend(commands::line_spacing(*spacing)),

            // ===== Style Changes =====
            Command::SetFont(font) => out.extend(text::font(*font)),
            Command::SetBold(enabled) => out.extend(text::bold(*enabled)),
            Command::SetUnderline(enabled) => out.extend(text::underline(*enabled)),
            Command::SetAlign(alignment) => out.extend(text::align(*alignment)),
            Command::SetSize(size) => out.extend(text::size(*size)),

            // ===== Content =====
            Command::Text(s) => out.extend(encode_text(s, encoding)?),
            Command::Raw(bytes) => out.extend_from_slice(bytes),
        }
        Ok(())
    }
}

/// Encode a command sequence to raw bytes.
///
/// Deterministic: the same commands and encoding always give the same
/// bytes. On error nothing is returned, there is no partial output.
///
/// ## Example
///
/// ```
/// use tillroll::command::{encode, Command};
/// use tillroll::protocol::encoding::TextEncoding;
///
/// let bytes = encode(&[Command::Init, Command::Cut], TextEncoding::Utf8).unwrap();
/// assert_eq!(bytes, vec![0x1B, 0x40, 0x1D, 0x56, 0x41, 0x00]);
/// ```
pub fn encode(commands: &[Command], encoding: TextEncoding) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for cmd in commands {
        cmd.encode_into(&mut out, encoding)?;
    }
    debug!(
        commands = commands.len(),
        bytes = out.len(),
        %encoding,
        "encoded command sequence"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse_symbols;
    use crate::error::TillrollError;

    fn encode_symbols(symbols: &[&str]) -> Vec<u8> {
        encode(&parse_symbols(symbols).unwrap(), TextEncoding::Utf8).unwrap()
    }

    #[test]
    fn test_wire_table() {
        let table: &[(&str, &[u8])] = &[
            ("INIT", &[0x1B, 0x40]),
            ("RESET", &[0x1B, 0x40]),
            ("FONT_A", &[0x1B, b'M', 0x00]),
            ("FONT_B", &[0x1B, b'M', 0x01]),
            ("BOLD_ON", &[0x1B, b'E', 0x01]),
            ("BOLD_OFF", &[0x1B, b'E', 0x00]),
            ("UNDERLINE_ON", &[0x1B, b'-', 0x01]),
            ("UNDERLINE_OFF", &[0x1B, b'-', 0x00]),
            ("ALIGN_LEFT", &[0x1B, b'a', 0x00]),
            ("ALIGN_CENTER", &[0x1B, b'a', 0x01]),
            ("ALIGN_RIGHT", &[0x1B, b'a', 0x02]),
            ("SIZE_NORMAL", &[0x1D, b'!', 0x00]),
            ("SIZE_DOUBLE_WIDTH", &[0x1D, b'!', 0x20]),
            ("SIZE_DOUBLE_HEIGHT", &[0x1D, b'!', 0x10]),
            ("SIZE_DOUBLE", &[0x1D, b'!', 0x30]),
            ("CUT_PAPER", &[0x1D, b'V', 0x41, 0x00]),
            ("FEED_LINE", b"\n"),
            ("FEED_LINES(4)", b"\n\n\n\n"),
            ("LINE_SPACING_DEFAULT", &[0x1B, b'2']),
            ("LINE_SPACING_NARROW", &[0x1B, b'3', 0x10]),
        ];
        for (symbol, expected) in table {
            assert_eq!(encode_symbols(&[*symbol]), *expected, "{symbol}");
        }
    }

    #[test]
    fn test_init_is_two_bytes() {
        assert_eq!(encode_symbols(&["INIT"]), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_cut_paper() {
        assert_eq!(encode_symbols(&["CUT_PAPER"]), vec![0x1D, 0x56, 0x41, 0x00]);
    }

    #[test]
    fn test_order_is_preserved() {
        let bytes = encode(
            &[
                Command::SetBold(true),
                Command::text("A"),
                Command::SetBold(false),
            ],
            TextEncoding::Ascii,
        )
        .unwrap();
        assert_eq!(bytes, vec![0x1B, 0x45, 0x01, b'A', 0x1B, 0x45, 0x00]);
    }

    #[test]
    fn test_deterministic() {
        let cmds = parse_symbols(["INIT", "ALIGN_CENTER", "SIZE_DOUBLE", "CUT_PAPER"]).unwrap();
        let first = encode(&cmds, TextEncoding::Utf8).unwrap();
        let second = encode(&cmds, TextEncoding::Utf8).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_raw_passthrough_skips_encoding() {
        let bytes = encode(&[Command::Raw(vec![0xFF, 0x00])], TextEncoding::Ascii).unwrap();
        assert_eq!(bytes, vec![0xFF, 0x00]);
    }

    #[test]
    fn test_text_encoding_error_propagates() {
        let result = encode(
            &[Command::Init, Command::text("naïve")],
            TextEncoding::Ascii,
        );
        assert!(matches!(
            result,
            Err(TillrollError::Encoding { character: 'ï', .. })
        ));
    }
}

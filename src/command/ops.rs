//! # Symbolic Commands
//!
//! The command vocabulary sits between documents and raw printer bytes:
//!
//! ```text
//! Documents → Vec<Command> (inspectable) → encode → Bytes
//! ```
//!
//! Each variant is one atomic directive. Literal text and raw escape
//! injection are explicit variants; an unrecognized symbol name never falls
//! through as text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TillrollError};
use crate::protocol::commands::LineSpacing;
use crate::protocol::text::{Alignment, CharSize, Font};

/// A single printer directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CommandRepr", into = "CommandRepr")]
pub enum Command {
    // ========== Printer Control ==========
    /// Initialize printer (ESC @).
    Init,

    /// Reset printer (ESC @). Same bytes as `Init`, kept as its own symbol.
    Reset,

    /// Feed and full cut (GS V A 0).
    Cut,

    /// One line feed.
    FeedLine,

    /// `n` line feeds.
    FeedLines(u8),

    /// Select default or narrow line spacing.
    SetLineSpacing(LineSpacing),

    // ========== Style Changes ==========
    /// Select font A or B.
    SetFont(Font),

    /// Enable/disable bold.
    SetBold(bool),

    /// Enable/disable underline.
    SetUnderline(bool),

    /// Set printer justification.
    SetAlign(Alignment),

    /// Set character size.
    SetSize(CharSize),

    // ========== Content ==========
    /// Literal text (no trailing newline), encoded with the job's encoding.
    Text(String),

    /// Raw bytes passed through untouched.
    Raw(Vec<u8>),
}

impl Command {
    /// The symbol name, or `None` for content variants.
    pub fn symbol(&self) -> Option<&'static str> {
        let name = match self {
            Self::Init => "INIT",
            Self::Reset => "RESET",
            Self::Cut => "CUT_PAPER",
            Self::FeedLine => "FEED_LINE",
            Self::FeedLines(_) => "FEED_LINES",
            Self::SetLineSpacing(LineSpacing::Default) => "LINE_SPACING_DEFAULT",
            Self::SetLineSpacing(LineSpacing::Narrow) => "LINE_SPACING_NARROW",
            Self::SetFont(Font::A) => "FONT_A",
            Self::SetFont(Font::B) => "FONT_B",
            Self::SetBold(true) => "BOLD_ON",
            Self::SetBold(false) => "BOLD_OFF",
            Self::SetUnderline(true) => "UNDERLINE_ON",
            Self::SetUnderline(false) => "UNDERLINE_OFF",
            Self::SetAlign(Alignment::Left) => "ALIGN_LEFT",
            Self::SetAlign(Alignment::Center) => "ALIGN_CENTER",
            Self::SetAlign(Alignment::Right) => "ALIGN_RIGHT",
            Self::SetSize(CharSize::Normal) => "SIZE_NORMAL",
            Self::SetSize(CharSize::DoubleWidth) => "SIZE_DOUBLE_WIDTH",
            Self::SetSize(CharSize::DoubleHeight) => "SIZE_DOUBLE_HEIGHT",
            Self::SetSize(CharSize::Double) => "SIZE_DOUBLE",
            Self::Text(_) | Self::Raw(_) => return None,
        };
        Some(name)
    }

    /// Text content shortcut.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FeedLines(n) => write!(f, "FEED_LINES({})", n),
            Self::Text(s) => write!(f, "TEXT({:?})", s),
            Self::Raw(bytes) => write!(f, "RAW({} bytes)", bytes.len()),
            other => f.write_str(other.symbol().unwrap_or_default()),
        }
    }
}

impl FromStr for Command {
    type Err = TillrollError;

    /// Parse a symbol name such as `BOLD_ON` or `FEED_LINES(3)`.
    ///
    /// Names are matched exactly (upper case). Bare `FEED_LINES` feeds one line.
    fn from_str(s: &str) -> Result<Self> {
        let cmd = match s.trim() {
            "INIT" => Self::Init,
            "RESET" => Self::Reset,
            "FONT_A" => Self::SetFont(Font::A),
            "FONT_B" => Self::SetFont(Font::B),
            "BOLD_ON" => Self::SetBold(true),
            "BOLD_OFF" => Self::SetBold(false),
            "UNDERLINE_ON" => Self::SetUnderline(true),
            "UNDERLINE_OFF" => Self::SetUnderline(false),
            "ALIGN_LEFT" => Self::SetAlign(Alignment::Left),
            "ALIGN_CENTER" => Self::SetAlign(Alignment::Center),
            "ALIGN_RIGHT" => Self::SetAlign(Alignment::Right),
            "SIZE_NORMAL" => Self::SetSize(CharSize::Normal),
            "SIZE_DOUBLE_WIDTH" => Self::SetSize(CharSize::DoubleWidth),
            "SIZE_DOUBLE_HEIGHT" => Self::SetSize(CharSize::DoubleHeight),
            "SIZE_DOUBLE" => Self::SetSize(CharSize::Double),
            "CUT_PAPER" => Self::Cut,
            "FEED_LINE" => Self::FeedLine,
            "FEED_LINES" => Self::FeedLines(1),
            "LINE_SPACING_DEFAULT" => Self::SetLineSpacing(LineSpacing::Default),
            "LINE_SPACING_NARROW" => Self::SetLineSpacing(LineSpacing::Narrow),
            other => return parse_feed_lines(other),
        };
        Ok(cmd)
    }
}

fn parse_feed_lines(s: &str) -> Result<Command> {
    s.strip_prefix("FEED_LINES(")
        .and_then(|rest| rest.strip_suffix(')'))
        .and_then(|n| n.trim().parse::<u8>().ok())
        .map(Command::FeedLines)
        .ok_or_else(|| TillrollError::UnknownCommand(s.to_string()))
}

/// Parse a list of symbol names, failing on the first unknown one.
///
/// ## Example
///
/// ```
/// use tillroll::command::{parse_symbols, Command};
///
/// let cmds = parse_symbols(["INIT", "BOLD_ON"]).unwrap();
/// assert_eq!(cmds, vec![Command::Init, Command::SetBold(true)]);
/// assert!(parse_symbols(["BOLD_ONN"]).is_err());
/// ```
pub fn parse_symbols<I, S>(symbols: I) -> Result<Vec<Command>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    symbols.into_iter().map(|s| s.as_ref().parse()).collect()
}

// ============================================================================
// JSON REPRESENTATION
// ============================================================================

/// Wire form of a command: a symbol string, or a one-key object for the
/// content and parameterized variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum CommandRepr {
    Symbol(String),
    Text { text: String },
    Raw { raw: Vec<u8> },
    FeedLines { feed_lines: u8 },
}

impl TryFrom<CommandRepr> for Command {
    type Error = TillrollError;

    fn try_from(repr: CommandRepr) -> Result<Self> {
        match repr {
            CommandRepr::Symbol(s) => s.parse(),
            CommandRepr::Text { text } => Ok(Self::Text(text)),
            CommandRepr::Raw { raw } => Ok(Self::Raw(raw)),
            CommandRepr::FeedLines { feed_lines } => Ok(Self::FeedLines(feed_lines)),
        }
    }
}

impl From<Command> for CommandRepr {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Text(text) => Self::Text { text },
            Command::Raw(raw) => Self::Raw { raw },
            Command::FeedLines(feed_lines) => Self::FeedLines { feed_lines },
            other => Self::Symbol(other.symbol().unwrap_or_default().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SYMBOLS: &[&str] = &[
        "INIT",
        "RESET",
        "FONT_A",
        "FONT_B",
        "BOLD_ON",
        "BOLD_OFF",
        "UNDERLINE_ON",
        "UNDERLINE_OFF",
        "ALIGN_LEFT",
        "ALIGN_CENTER",
        "ALIGN_RIGHT",
        "SIZE_NORMAL",
        "SIZE_DOUBLE_WIDTH",
        "SIZE_DOUBLE_HEIGHT",
        "SIZE_DOUBLE",
        "CUT_PAPER",
        "FEED_LINE",
        "LINE_SPACING_DEFAULT",
        "LINE_SPACING_NARROW",
    ];

    #[test]
    fn test_every_symbol_parses_and_names_itself() {
        for &name in ALL_SYMBOLS {
            let cmd: Command = name.parse().unwrap();
            assert_eq!(cmd.symbol(), Some(name));
        }
    }

    #[test]
    fn test_feed_lines_forms() {
        assert_eq!("FEED_LINES".parse::<Command>().unwrap(), Command::FeedLines(1));
        assert_eq!(
            "FEED_LINES(3)".parse::<Command>().unwrap(),
            Command::FeedLines(3)
        );
        assert_eq!(Command::FeedLines(3).to_string(), "FEED_LINES(3)");
    }

    #[test]
    fn test_unknown_symbol_is_error() {
        for bad in ["BOLD", "bold_on", "FEED_LINES(x)", "FEED_LINES(999)", "Hello"] {
            match bad.parse::<Command>() {
                Err(TillrollError::UnknownCommand(name)) => assert_eq!(name, bad),
                other => panic!("{bad}: expected UnknownCommand, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_json_symbols_and_objects() {
        let json = r#"["INIT", {"text": "Hi"}, {"feed_lines": 2}, {"raw": [27, 64]}, "CUT_PAPER"]"#;
        let cmds: Vec<Command> = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmds,
            vec![
                Command::Init,
                Command::text("Hi"),
                Command::FeedLines(2),
                Command::Raw(vec![27, 64]),
                Command::Cut,
            ]
        );
    }

    #[test]
    fn test_json_unknown_symbol_rejected() {
        let result: std::result::Result<Vec<Command>, _> =
            serde_json::from_str(r#"["INIT", "BOLD_MAYBE"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_serializes_back_to_symbols() {
        let cmds = vec![Command::SetBold(true), Command::text("x")];
        let json = serde_json::to_string(&cmds).unwrap();
        assert_eq!(json, r#"["BOLD_ON",{"text":"x"}]"#);
    }
}

//! # ESC/POS Printer Control Commands
//!
//! This module implements the printer control half of the ESC/POS command
//! set: initialization, paper feed and the cutter.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`, `ESC 2`
//! - Multi-byte with parameters: `GS V m n`, `ESC 3 n`
//!
//! The byte values here are the firmware contract. They must be reproduced
//! exactly for a printer to recognize them.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// Most ESC/POS commands begin with ESC (0x1B). This byte signals the start
/// of a control sequence rather than printable text.
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size, cutter and graphics commands.
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets the printer to its power-on defaults.
/// Every print job starts with this.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## What Gets Reset
///
/// - Print buffer is cleared
/// - Bold, underline and character size are turned off
/// - Alignment returns to left
/// - Line spacing returns to default
///
/// ## Example
///
/// ```
/// use tillroll::protocol::commands;
///
/// let init = commands::init();
/// assert_eq!(init, vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// # Feed and Full Cut (GS V 65 n)
///
/// Feeds paper to the cutter position plus `n` motion units, then performs
/// a full cut. Receipts use `n = 0`.
///
/// ## Protocol Details
///
/// | Format  | Bytes      |
/// |---------|------------|
/// | ASCII   | GS V A n   |
/// | Hex     | 1D 56 41 n |
/// | Decimal | 29 86 65 n |
///
/// ## Example
///
/// ```
/// use tillroll::protocol::commands;
///
/// assert_eq!(commands::cut(), vec![0x1D, 0x56, 0x41, 0x00]);
/// ```
#[inline]
pub fn cut() -> Vec<u8> {
    vec![GS, b'V', 0x41, 0x00]
}

// ============================================================================
// PAPER FEED COMMANDS
// ============================================================================

/// Print the line buffer and advance one line.
#[inline]
pub fn feed_line() -> Vec<u8> {
    vec![LF]
}

/// # Feed N Lines
///
/// Emits `n` line feeds. Unlike `ESC d n` this needs no printer support
/// beyond plain LF, so every ESC/POS firmware handles it.
///
/// ## Example
///
/// ```
/// use tillroll::protocol::commands;
///
/// assert_eq!(commands::feed_lines(3), b"\n\n\n".to_vec());
/// assert!(commands::feed_lines(0).is_empty());
/// ```
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![LF; n as usize]
}

// ============================================================================
// LINE SPACING
// ============================================================================

/// Line spacing presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSpacing {
    /// Printer default (about 1/6 inch)
    #[default]
    Default,
    /// Narrow spacing of 16 motion units
    Narrow,
}

/// Narrow line spacing in motion units (ESC 3 n)
pub const NARROW_LINE_SPACING: u8 = 0x10;

/// # Select Line Spacing (ESC 2 / ESC 3 n)
///
/// ## Protocol Details
///
/// | Preset  | ASCII     | Hex      |
/// |---------|-----------|----------|
/// | Default | ESC 2     | 1B 32    |
/// | Narrow  | ESC 3 16  | 1B 33 10 |
pub fn line_spacing(spacing: LineSpacing) -> Vec<u8> {
    match spacing {
        LineSpacing::Default => vec![ESC, b'2'],
        LineSpacing::Narrow => vec![ESC, b'3', NARROW_LINE_SPACING],
    }
}

// ============================================================================
// TESTS
// ============================================================================

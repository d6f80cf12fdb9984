//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level byte builders for the subset of ESC/POS
//! used by receipt printing.
//!
//! ## Module Structure
//!
//! - [`commands`]: Printer control (init, cut, feed, line spacing)
//! - [`text`]: Text styling (alignment, fonts, bold, underline, size)
//! - [`encoding`]: Unicode to printer byte encodings
//!
//! ## Usage Example
//!
//! ```
//! use tillroll::protocol::{commands, text};
//! use tillroll::protocol::text::Alignment;
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align(Alignment::Center));
//! data.extend(text::bold(true));
//! data.extend(b"RECEIPT\n");
//! data.extend(text::bold(false));
//! data.extend(commands::cut());
//! ```

pub mod commands;
pub mod encoding;
pub mod text;

//! # Command Encoder
//!
//! Pure, stateless translation from the symbolic command vocabulary to the
//! escape sequences printer firmware expects.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────┐
//! │  Documents  │ ──► │ Vec<Command> │ ──► │  encode  │ ──► bytes
//! │ (formatter) │     │ (inspectable)│     │          │
//! └─────────────┘     └──────────────┘     └──────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use tillroll::command::{encode, parse_symbols, Command};
//! use tillroll::protocol::encoding::TextEncoding;
//!
//! let mut cmds = parse_symbols(["INIT", "ALIGN_CENTER", "BOLD_ON"]).unwrap();
//! cmds.push(Command::text("HELLO"));
//! cmds.push(Command::FeedLine);
//! cmds.push(Command::Cut);
//!
//! let bytes = encode(&cmds, TextEncoding::Utf8).unwrap();
//! assert_eq!(&bytes[..2], &[0x1B, 0x40]);
//! ```

mod codegen;
mod ops;

pub use codegen::encode;
pub use ops::{Command, parse_symbols};

//! # Document Formatter
//!
//! Builds complete print jobs by composing commands with word-wrapped,
//! aligned, width-constrained text lines.
//!
//! A document first compiles to an inspectable `Vec<Command>`, which the
//! command encoder then turns into the bytes of a [`PrintJob`]:
//!
//! ```text
//! InvoiceDocument ─┐
//!                  ├─► compile ─► Vec<Command> ─► encode ─► PrintJob
//! TestPage ────────┘
//! ```
//!
//! Everything here is a pure function of its inputs. A failed build returns
//! an error and no job.
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use tillroll::document::{build_invoice, Company, InvoiceDocument, LineItem};
//! use tillroll::printer::PrinterConfig;
//!
//! let doc = InvoiceDocument {
//!     company: Company::new("Corner Cafe", "1 Main St"),
//!     invoice_number: "1001".into(),
//!     customer_name: "Ada".into(),
//!     date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(8, 30, 0).unwrap(),
//!     items: vec![LineItem::new("Coffee", 2, Decimal::new(300, 2))],
//!     total: Decimal::new(600, 2),
//! };
//! let job = build_invoice(&doc, &PrinterConfig::default()).unwrap();
//! assert!(!job.is_empty());
//! ```

pub mod format;
pub mod invoice;
pub mod layout;
pub mod test_page;

pub use format::{format_currency, format_date};
pub use invoice::{Company, InvoiceDocument, LineItem, build_invoice, compile_invoice};
pub use layout::{align_text, separator, wrap_and_align};
pub use test_page::{TestPage, build_test_page, compile_test_page};

use std::fmt::Write as _;

use crate::command::{self, Command};
use crate::error::Result;
use crate::printer::PrinterConfig;
use crate::protocol::encoding::TextEncoding;
use crate::protocol::text::Alignment;

// ============================================================================
// DOCUMENT TRAIT
// ============================================================================

/// Anything that can be laid out as a receipt.
pub trait Document {
    /// Lay out the document as a command sequence.
    fn compile(&self, config: &PrinterConfig) -> Result<Vec<Command>>;

    /// Compile and encode in one step.
    fn build(&self, config: &PrinterConfig) -> Result<PrintJob> {
        let commands = self.compile(config)?;
        PrintJob::encode(&commands, config.encoding)
    }
}

// ============================================================================
// PRINT JOB
// ============================================================================

/// The final byte stream for one document.
///
/// A job has no mutators and is not `Clone`: transports take it by value,
/// so each job is delivered at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct PrintJob {
    bytes: Vec<u8>,
}

impl PrintJob {
    /// Encode a command sequence into a job.
    pub fn encode(commands: &[Command], encoding: TextEncoding) -> Result<Self> {
        Ok(Self {
            bytes: command::encode(commands, encoding)?,
        })
    }

    /// Wrap bytes that were produced elsewhere.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Space-separated upper-case hex, e.g. `1B 40 0A`.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(self.bytes.len() * 3);
        for (i, b) in self.bytes.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{:02X}", b);
        }
        out
    }
}

// ============================================================================
// EMIT CONTEXT
// ============================================================================

/// Command buffer plus the paper width the lines are laid out for.
pub(crate) struct EmitContext {
    commands: Vec<Command>,
    width: usize,
}

impl EmitContext {
    pub(crate) fn new(width: usize) -> Self {
        Self {
            commands: Vec::new(),
            width,
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn push(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    pub(crate) fn extend(&mut self, cmds: impl IntoIterator<Item = Command>) {
        self.commands.extend(cmds);
    }

    /// Wrap and align `text` to the paper width, one `Text` + `FeedLine`
    /// pair per resulting line.
    pub(crate) fn line(&mut self, text: &str, align: Alignment) {
        for line in layout::wrap_lines(text, align, self.width) {
            self.raw_line(line);
        }
    }

    /// Emit an already laid out line.
    pub(crate) fn raw_line(&mut self, line: String) {
        self.commands.push(Command::Text(line));
        self.commands.push(Command::FeedLine);
    }

    /// Full-width separator line.
    pub(crate) fn separator(&mut self, ch: char) {
        self.raw_line(layout::separator(ch, self.width));
    }

    pub(crate) fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}

// ============================================================================
// PREVIEW
// ============================================================================

/// Plain-text rendering of a command sequence.
///
/// Only text and line feeds contribute; style and control commands are
/// dropped.
pub fn preview(commands: &[Command]) -> String {
    let mut out = String::new();
    for cmd in commands {
        match cmd {
            Command::Text(text) => out.push_str(text),
            Command::FeedLine => out.push('\n'),
            Command::FeedLines(n) => {
                for _ in 0..*n {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_job_hex() {
        let job = PrintJob::encode(&[Command::Init, Command::FeedLine], TextEncoding::Utf8).unwrap();
        assert_eq!(job.to_hex(), "1B 40 0A");
        assert_eq!(job.len(), 3);
        assert_eq!(job.into_bytes(), vec![0x1B, 0x40, 0x0A]);
    }

    #[test]
    fn test_preview_keeps_text_and_feeds() {
        let cmds = vec![
            Command::Init,
            Command::SetBold(true),
            Command::text("Hi"),
            Command::FeedLine,
            Command::text("there"),
            Command::FeedLines(2),
            Command::Cut,
        ];
        assert_eq!(preview(&cmds), "Hi\nthere\n\n");
    }

    #[test]
    fn test_emit_context_lines_have_paper_width() {
        let mut ctx = EmitContext::new(10);
        ctx.line("the quick brown fox", Alignment::Left);
        ctx.separator('-');
        let cmds = ctx.into_commands();
        assert_eq!(
            cmds,
            vec![
                Command::text("the quick "),
                Command::FeedLine,
                Command::text("brown fox "),
                Command::FeedLine,
                Command::text("----------"),
                Command::FeedLine,
            ]
        );
    }
}

//! # Test Page
//!
//! A fixed diagnostic receipt for checking a printer by eye. It prints the
//! printer's identity and settings, then exercises each font, emphasis,
//! size, alignment and line-spacing directive.
//!
//! The print time is passed in so the page stays a pure function of its
//! inputs.

use chrono::NaiveDateTime;
use tracing::debug;

use super::format::format_date;
use super::{Document, EmitContext, PrintJob};
use crate::command::Command;
use crate::error::Result;
use crate::printer::{PrinterConfig, PrinterProfile};
use crate::protocol::commands::LineSpacing;
use crate::protocol::text::{Alignment, CharSize, Font};

/// Diagnostic page for one printer.
#[derive(Debug, Clone, Copy)]
pub struct TestPage<'a> {
    pub profile: &'a PrinterProfile,
    pub printed_at: NaiveDateTime,
}

impl<'a> TestPage<'a> {
    pub fn new(profile: &'a PrinterProfile, printed_at: NaiveDateTime) -> Self {
        Self {
            profile,
            printed_at,
        }
    }
}

impl Document for TestPage<'_> {
    fn compile(&self, config: &PrinterConfig) -> Result<Vec<Command>> {
        config.validate()?;

        let mut ctx = EmitContext::new(config.paper_width);
        ctx.extend([Command::Init, Command::Reset]);

        // Header
        ctx.extend([
            Command::SetAlign(Alignment::Center),
            Command::SetSize(CharSize::Double),
            Command::SetBold(true),
        ]);
        ctx.line("PRINTER TEST", Alignment::Center);
        ctx.extend([Command::SetSize(CharSize::Normal), Command::SetBold(false)]);
        ctx.separator('=');

        // Printer info
        ctx.push(Command::SetAlign(Alignment::Left));
        let profile = self.profile;
        ctx.line(&format!("Printer: {}", profile.name), Alignment::Left);
        ctx.line(
            &format!("Type: {}", profile.kind().to_string().to_uppercase()),
            Alignment::Left,
        );
        ctx.line(&format!("Address: {}", profile.connection), Alignment::Left);
        ctx.line(
            &format!("Paper width: {} chars", config.paper_width),
            Alignment::Left,
        );
        ctx.line(&format!("Encoding: {}", config.encoding), Alignment::Left);
        ctx.line(
            &format!("Date: {}", format_date(&self.printed_at)),
            Alignment::Left,
        );
        ctx.separator('-');

        section(&mut ctx, "FONT TESTS:");
        ctx.line("Normal text", Alignment::Left);
        ctx.push(Command::SetFont(Font::B));
        ctx.line("Font B text", Alignment::Left);
        ctx.push(Command::SetFont(Font::A));
        ctx.push(Command::SetBold(true));
        ctx.line("Bold text", Alignment::Left);
        ctx.push(Command::SetBold(false));
        ctx.push(Command::SetUnderline(true));
        ctx.line("Underlined text", Alignment::Left);
        ctx.push(Command::SetUnderline(false));
        ctx.separator('-');

        section(&mut ctx, "SIZE TESTS:");
        for (size, label) in [
            (CharSize::DoubleWidth, "Double width"),
            (CharSize::DoubleHeight, "Double height"),
            (CharSize::Double, "Double size"),
        ] {
            ctx.push(Command::SetSize(size));
            ctx.line(label, Alignment::Left);
        }
        ctx.push(Command::SetSize(CharSize::Normal));
        ctx.separator('-');

        section(&mut ctx, "ALIGNMENT TESTS:");
        for (align, label) in [
            (Alignment::Left, "Left aligned"),
            (Alignment::Center, "Center aligned"),
            (Alignment::Right, "Right aligned"),
        ] {
            ctx.push(Command::SetAlign(align));
            ctx.line(label, align);
        }
        ctx.push(Command::SetAlign(Alignment::Left));
        ctx.separator('-');

        section(&mut ctx, "LINE SPACING:");
        ctx.push(Command::SetLineSpacing(LineSpacing::Narrow));
        ctx.line("Narrow spacing line 1", Alignment::Left);
        ctx.line("Narrow spacing line 2", Alignment::Left);
        ctx.push(Command::SetLineSpacing(LineSpacing::Default));
        ctx.line("Default spacing line 1", Alignment::Left);
        ctx.line("Default spacing line 2", Alignment::Left);
        ctx.separator('=');

        // Footer
        ctx.extend([Command::SetAlign(Alignment::Center), Command::SetBold(true)]);
        ctx.line("TEST SUCCESSFUL!", Alignment::Center);
        ctx.push(Command::SetBold(false));
        ctx.extend([Command::FeedLines(3), Command::Cut]);

        let commands = ctx.into_commands();
        debug!(
            printer = %profile.name,
            commands = commands.len(),
            "compiled test page"
        );
        Ok(commands)
    }
}

fn section(ctx: &mut EmitContext, title: &str) {
    ctx.push(Command::SetBold(true));
    ctx.line(title, Alignment::Left);
    ctx.push(Command::SetBold(false));
}

/// Lay out the test page as commands.
pub fn compile_test_page(
    profile: &PrinterProfile,
    config: &PrinterConfig,
    printed_at: NaiveDateTime,
) -> Result<Vec<Command>> {
    TestPage::new(profile, printed_at).compile(config)
}

/// Compile and encode the test page.
pub fn build_test_page(
    profile: &PrinterProfile,
    config: &PrinterConfig,
    printed_at: NaiveDateTime,
) -> Result<PrintJob> {
    TestPage::new(profile, printed_at).build(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::layout::text_width;
    use crate::document::preview;
    use crate::error::TillrollError;
    use chrono::NaiveDate;

    fn printed_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn profile() -> PrinterProfile {
        PrinterProfile::network("front", "Front Counter", "192.168.1.50", 9100)
    }

    #[test]
    fn test_every_directive_exercised() {
        let cmds = compile_test_page(&profile(), &PrinterConfig::default(), printed_at()).unwrap();
        let symbols: Vec<&str> = cmds.iter().filter_map(Command::symbol).collect();
        for expected in [
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
            "LINE_SPACING_NARROW",
            "LINE_SPACING_DEFAULT",
            "FEED_LINE",
            "FEED_LINES",
            "CUT_PAPER",
        ] {
            assert!(symbols.contains(&expected), "missing {expected}");
        }
        assert_eq!(cmds.last(), Some(&Command::Cut));
    }

    #[test]
    fn test_printer_info_block() {
        let cmds = compile_test_page(&profile(), &PrinterConfig::default(), printed_at()).unwrap();
        let text = preview(&cmds);
        assert!(text.contains("Printer: Front Counter"));
        assert!(text.contains("Type: IP"));
        assert!(text.contains("Address: 192.168.1.50:9100"));
        assert!(text.contains("Paper width: 48 chars"));
        assert!(text.contains("Encoding: utf8"));
        assert!(text.contains("Date: Jun 01, 2024 12:00"));
        assert!(text.contains("TEST SUCCESSFUL!"));
    }

    #[test]
    fn test_lines_fit_narrow_paper() {
        let config = PrinterConfig::with_width(32);
        let cmds = compile_test_page(&profile(), &config, printed_at()).unwrap();
        for cmd in &cmds {
            if let Command::Text(line) = cmd {
                assert_eq!(text_width(line), 32, "{line:?}");
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let config = PrinterConfig::default();
        let a = build_test_page(&profile(), &config, printed_at()).unwrap();
        let b = build_test_page(&profile(), &config, printed_at()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(matches!(
            build_test_page(&profile(), &PrinterConfig::with_width(0), printed_at()),
            Err(TillrollError::InvalidConfig(_))
        ));
    }
}

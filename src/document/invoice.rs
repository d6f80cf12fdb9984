//! # Invoice
//!
//! The customer invoice receipt: a centered company header, invoice details,
//! one line per item with its amount right-aligned, a double-width total and
//! a closing message.
//!
//! ```text
//!               CORNER CAFE          (double, bold)
//!                1 Main St
//! ================================================
//! INVOICE #1001                                (bold)
//! Customer: Ada
//! Date: Jan 02, 2024 08:30
//! ------------------------------------------------
//! ITEMS:                                       (bold)
//! Coffee x2                                  $6.00
//! ------------------------------------------------
//!                                 TOTAL: $6.00  (double width, bold)
//! ================================================
//!           Thank you for your business!
//! ```
//!
//! JSON input uses snake_case field names; the camelCase names of the old
//! browser payloads (`invoiceNumber`, `customerName`, `price`) are accepted
//! as aliases.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::format::{format_currency, format_date};
use super::layout::{align_text, text_width};
use super::{Document, EmitContext, PrintJob};
use crate::command::Command;
use crate::error::{Result, TillrollError};
use crate::printer::PrinterConfig;
use crate::protocol::text::{Alignment, CharSize};

/// Closing line of every invoice
pub const THANK_YOU: &str = "Thank you for your business!";

/// Issuer details printed in the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Company {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// One invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    #[serde(alias = "price", alias = "unitPrice")]
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// `quantity × unit_price`, or `None` if it does not fit in a `Decimal`.
    pub fn extension(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// A customer invoice.
///
/// `total` is supplied by the caller and must equal the sum of the item
/// extensions exactly; it is checked, never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    pub company: Company,
    #[serde(alias = "invoiceNumber")]
    pub invoice_number: String,
    #[serde(alias = "customerName")]
    pub customer_name: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDateTime,
    pub items: Vec<LineItem>,
    pub total: Decimal,
}

impl InvoiceDocument {
    /// Sum of all item extensions.
    pub fn computed_total(&self) -> Result<Decimal> {
        self.items
            .iter()
            .enumerate()
            .try_fold(Decimal::ZERO, |acc, (i, item)| {
                item.extension()
                    .and_then(|amount| acc.checked_add(amount))
                    .ok_or_else(|| {
                        TillrollError::InvalidDocument(format!("item {} amount overflows", i + 1))
                    })
            })
    }

    /// Check required fields and the total.
    pub fn validate(&self) -> Result<()> {
        require("company name", &self.company.name)?;
        require("company address", &self.company.address)?;
        require("invoice number", &self.invoice_number)?;
        require("customer name", &self.customer_name)?;

        if self.items.is_empty() {
            return Err(TillrollError::InvalidDocument(
                "invoice has no items".to_string(),
            ));
        }
        for (i, item) in self.items.iter().enumerate() {
            require(&format!("item {} name", i + 1), &item.name)?;
            if item.quantity == 0 {
                return Err(TillrollError::InvalidDocument(format!(
                    "item {} ({}) has zero quantity",
                    i + 1,
                    item.name
                )));
            }
        }

        let computed = self.computed_total()?;
        if computed != self.total {
            return Err(TillrollError::InvalidDocument(format!(
                "total {} does not match sum of items {}",
                self.total, computed
            )));
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TillrollError::InvalidDocument(format!(
            "{} is required",
            field
        )));
    }
    Ok(())
}

impl Document for InvoiceDocument {
    fn compile(&self, config: &PrinterConfig) -> Result<Vec<Command>> {
        compile_invoice(self, config)
    }
}

/// Lay out an invoice as commands.
pub fn compile_invoice(doc: &InvoiceDocument, config: &PrinterConfig) -> Result<Vec<Command>> {
    config.validate()?;
    doc.validate()?;

    let mut ctx = EmitContext::new(config.paper_width);
    ctx.extend([Command::Init, Command::Reset]);

    // Header
    ctx.extend([
        Command::SetAlign(Alignment::Center),
        Command::SetSize(CharSize::Double),
        Command::SetBold(true),
    ]);
    ctx.line(&doc.company.name, Alignment::Center);
    ctx.extend([Command::SetSize(CharSize::Normal), Command::SetBold(false)]);
    ctx.line(&doc.company.address, Alignment::Center);
    if let Some(phone) = doc.company.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        ctx.line(phone, Alignment::Center);
    }
    ctx.push(Command::FeedLine);
    ctx.separator('=');

    // Details
    ctx.extend([Command::SetAlign(Alignment::Left), Command::SetBold(true)]);
    ctx.line(&format!("INVOICE #{}", doc.invoice_number), Alignment::Left);
    ctx.push(Command::SetBold(false));
    ctx.line(&format!("Customer: {}", doc.customer_name), Alignment::Left);
    ctx.line(&format!("Date: {}", format_date(&doc.date)), Alignment::Left);
    ctx.separator('-');

    // Items
    ctx.push(Command::SetBold(true));
    ctx.line("ITEMS:", Alignment::Left);
    ctx.push(Command::SetBold(false));
    for (i, item) in doc.items.iter().enumerate() {
        let amount = item.extension().ok_or_else(|| {
            TillrollError::InvalidDocument(format!("item {} amount overflows", i + 1))
        })?;
        let line = item_line(item, amount, ctx.width());
        ctx.raw_line(line);
    }
    ctx.separator('-');

    // Total
    ctx.extend([Command::SetSize(CharSize::DoubleWidth), Command::SetBold(true)]);
    ctx.line(
        &format!("TOTAL: {}", format_currency(doc.total)),
        Alignment::Right,
    );
    ctx.extend([Command::SetSize(CharSize::Normal), Command::SetBold(false)]);
    ctx.separator('=');

    // Footer
    ctx.push(Command::SetAlign(Alignment::Center));
    ctx.line(THANK_YOU, Alignment::Center);
    ctx.extend([Command::FeedLines(3), Command::Cut]);

    let commands = ctx.into_commands();
    debug!(
        invoice = %doc.invoice_number,
        items = doc.items.len(),
        commands = commands.len(),
        "compiled invoice"
    );
    Ok(commands)
}

/// Compile and encode an invoice.
pub fn build_invoice(doc: &InvoiceDocument, config: &PrinterConfig) -> Result<PrintJob> {
    doc.build(config)
}

/// `"<name> x<qty>"` in a left-aligned field, a space, then the amount.
///
/// The name field is `width - len(amount) - 1` wide and is truncated rather
/// than wrapped, so the amount column always stays on the item's line.
fn item_line(item: &LineItem, amount: Decimal, width: usize) -> String {
    let amount = format_currency(amount);
    let amount_len = text_width(&amount);
    if amount_len >= width {
        return align_text(&amount, Alignment::Right, width);
    }

    let field = width - amount_len - 1;
    let name = item.name.split_whitespace().collect::<Vec<_>>().join(" ");
    let label = format!("{} x{}", name, item.quantity);
    format!("{} {}", align_text(&label, Alignment::Left, field), amount)
}

// ============================================================================
// DATE INPUT
// ============================================================================

/// Parse an invoice date.
///
/// Accepts RFC 3339 (`2024-01-02T08:30:00Z`, offset dropped after
/// conversion to the stated local time), a naive `2024-01-02T08:30:00` or
/// `2024-01-02 08:30:00`, and a bare `2024-01-02` (midnight).
pub fn parse_date(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    Err(TillrollError::InvalidDocument(format!(
        "unrecognized date: {:?}",
        s
    )))
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_date(&s).map_err(serde::de::Error::custom)
}

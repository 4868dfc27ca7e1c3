//! # Invoice Renderer
//!
//! Turns a recorded sale into a printable invoice document.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Invoice Document                                    │
//! │                                                                         │
//! │  Header:  shop name, address, phone/email, GSTIN                       │
//! │  Meta:    invoice number, date, customer name/phone                    │
//! │  Rows:    one per line item (name, qty, unit price, amount)            │
//! │  Totals:  subtotal, discount, tax, total, amount paid, balance         │
//! │  Footer:  fixed thank-you and terms strings                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The renderer must tolerate dangling references: a sale may point at a
//! customer or product that has since been deleted. Those degrade to
//! placeholder text rather than failing.
//!
//! The output here is the structured document plus a deterministic
//! plain-text rendering. Turning that into a downloadable PDF is the job of
//! an external document-export collaborator.

use chrono::NaiveDate;

use crate::ledger::{compute_invoice, outstanding_addition};
use crate::money::{Money, Rate};
use crate::types::{Customer, Product, Sale, Settings};

// =============================================================================
// Placeholder and Footer Strings
// =============================================================================

/// Shown when a sale has no linked customer, or the customer was deleted.
pub const WALK_IN_CUSTOMER: &str = "Walk-in Customer";

/// Shown when a line item references a product that no longer exists and
/// carries no name snapshot.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Fixed footer, printed on every invoice.
pub const FOOTER_THANKS: &str = "Thank you for your business!";
pub const FOOTER_TERMS: &str = "Terms: Goods once sold are not returnable";

// =============================================================================
// Document Model
// =============================================================================

/// Shop identification block, from settings.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceHeader {
    pub shop_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub gst_number: String,
}

/// Invoice metadata block.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceMeta {
    /// Display number: the assigned invoice number when present,
    /// otherwise the record id.
    pub invoice_no: String,
    pub date: NaiveDate,
    pub customer_name: String,
    /// Present only when the sale has a resolvable customer.
    pub customer_phone: Option<String>,
}

/// One row of the line-item table.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceRow {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub amount: Money,
}

/// The totals block at the foot of the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceTotalsBlock {
    pub subtotal: Money,
    pub discount: Rate,
    pub discount_amount: Money,
    pub tax: Rate,
    pub tax_amount: Money,
    pub total: Money,
    pub amount_paid: Money,
    /// Amount left unpaid on this invoice, clamped at zero for display.
    pub balance_due: Money,
}

/// A fully resolved, printable invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDocument {
    pub header: InvoiceHeader,
    pub meta: InvoiceMeta,
    pub rows: Vec<InvoiceRow>,
    pub totals: InvoiceTotalsBlock,
    pub footer: [&'static str; 2],
}

// =============================================================================
// Building
// =============================================================================

/// Resolves a sale against the customer, catalog, and settings records into
/// a printable document.
///
/// ## Fallback Rules
/// - Missing customer (walk-in or deleted): name shows "Walk-in Customer",
///   no phone line.
/// - Missing product and no name snapshot: row shows "Unknown Product".
/// - Missing price snapshot: unit price reconstructed as
///   `subtotal / quantity`.
pub fn build(
    sale: &Sale,
    customer: Option<&Customer>,
    products: &[Product],
    settings: &Settings,
) -> InvoiceDocument {
    let header = InvoiceHeader {
        shop_name: settings.shop_name.clone(),
        address: settings.address.clone(),
        phone: settings.phone.clone(),
        email: settings.email.clone(),
        gst_number: settings.gst_number.clone(),
    };

    let meta = InvoiceMeta {
        invoice_no: sale
            .invoice_number
            .clone()
            .unwrap_or_else(|| sale.id.to_string()),
        date: sale.date,
        customer_name: customer
            .map(|c| c.name.clone())
            .unwrap_or_else(|| WALK_IN_CUSTOMER.to_string()),
        customer_phone: customer.map(|c| c.phone.clone()),
    };

    let rows = sale
        .products
        .iter()
        .map(|item| {
            let name = item
                .name
                .clone()
                .or_else(|| {
                    products
                        .iter()
                        .find(|p| p.id == item.product_id)
                        .map(|p| p.name.clone())
                })
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());

            InvoiceRow {
                name,
                quantity: item.quantity,
                unit_price: item.unit_price(),
                amount: item.subtotal,
            }
        })
        .collect();

    let computed = compute_invoice(&sale.products, sale.discount, sale.tax);
    let balance = outstanding_addition(sale.total, sale.amount_paid);
    let totals = InvoiceTotalsBlock {
        subtotal: computed.subtotal,
        discount: sale.discount,
        discount_amount: computed.discount_amount,
        tax: sale.tax,
        tax_amount: computed.tax_amount,
        total: sale.total,
        amount_paid: sale.amount_paid,
        balance_due: balance.max(Money::zero()),
    };

    InvoiceDocument {
        header,
        meta,
        rows,
        totals,
        footer: [FOOTER_THANKS, FOOTER_TERMS],
    }
}

// =============================================================================
// Plain-Text Rendering
// =============================================================================

/// Width of the printable area, in characters.
const PAGE_WIDTH: usize = 64;

fn centered(text: &str) -> String {
    let len = text.chars().count();
    if len >= PAGE_WIDTH {
        return text.to_string();
    }
    format!("{:indent$}{}", "", text, indent = (PAGE_WIDTH - len) / 2)
}

fn rule() -> String {
    "-".repeat(PAGE_WIDTH)
}

impl InvoiceDocument {
    /// Renders the document as fixed-width plain text.
    ///
    /// Deterministic: the same document always produces the same bytes.
    pub fn to_text(&self) -> String {
        let mut out = Vec::new();

        // Shop header
        out.push(centered(&self.header.shop_name));
        out.push(centered(&self.header.address));
        if self.header.email.is_empty() {
            out.push(centered(&format!("Phone: {}", self.header.phone)));
        } else {
            out.push(centered(&format!(
                "Phone: {} | Email: {}",
                self.header.phone, self.header.email
            )));
        }
        out.push(centered(&format!("GSTIN: {}", self.header.gst_number)));
        out.push(rule());

        // Metadata
        out.push(format!("Invoice #: {}", self.meta.invoice_no));
        out.push(format!("Invoice Date: {}", self.meta.date));
        out.push(format!("Customer: {}", self.meta.customer_name));
        if let Some(phone) = &self.meta.customer_phone {
            out.push(format!("Phone: {}", phone));
        }
        out.push(rule());

        // Line-item table
        out.push(format!(
            "{:<34} {:>5} {:>10} {:>12}",
            "Item", "Qty", "Price", "Amount"
        ));
        out.push(rule());
        for row in &self.rows {
            out.push(format!(
                "{:<34} {:>5} {:>10} {:>12}",
                row.name,
                row.quantity,
                row.unit_price.to_string(),
                row.amount.to_string()
            ));
        }
        out.push(rule());

        // Totals
        let t = &self.totals;
        out.push(format!("{:>51} {:>12}", "Subtotal:", t.subtotal.to_string()));
        out.push(format!(
            "{:>51} {:>12}",
            format!("Discount ({}):", t.discount),
            format!("-{}", t.discount_amount)
        ));
        out.push(format!(
            "{:>51} {:>12}",
            format!("Tax ({}):", t.tax),
            t.tax_amount.to_string()
        ));
        out.push(format!("{:>51} {:>12}", "Total:", t.total.to_string()));
        out.push(format!(
            "{:>51} {:>12}",
            "Amount Paid:",
            t.amount_paid.to_string()
        ));
        out.push(format!(
            "{:>51} {:>12}",
            "Balance:",
            t.balance_due.to_string()
        ));

        // Footer
        out.push(String::new());
        out.push(centered(self.footer[0]));
        out.push(centered(self.footer[1]));
        out.push(String::new());

        out.join("\n")
    }
}

// =============================================================================
// Export File Names
// =============================================================================

/// File name used by the sales-report and view-bill entry points:
/// `invoice_<id>_<date>.pdf`.
pub fn report_file_name(sale: &Sale) -> String {
    format!("invoice_{}_{}.pdf", sale.id, sale.date)
}

/// File name used by the new-sale counter flow:
/// `invoice-<date>-<customerName>.pdf`, with `walkin` standing in when no
/// customer is linked.
///
/// Kept distinct from [`report_file_name`]; the two call sites differ in
/// the original and are preserved as-is.
pub fn counter_file_name(date: NaiveDate, customer: Option<&Customer>) -> String {
    let who = customer.map(|c| c.name.as_str()).unwrap_or("walkin");
    format!("invoice-{}-{}.pdf", date, who)
}

// =============================================================================
// Unit Tests
// =============================================================================

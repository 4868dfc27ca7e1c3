//! # Domain Types
//!
//! Core domain types used throughout Dukaan POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Product     │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │   │  id (u64)       │   │  id (u64)       │       │
//! │  │  name, phone    │   │  name, price    │   │  date, items    │       │
//! │  │  balance        │   │  stock, category│   │  total, paid    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Sale ──weak ref by id──► Customer / Product                           │
//! │  (deleting either never cascades to historical sales)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names serialize in camelCase, matching the collection blobs the
//! original single-page app kept in browser storage. Fields that appeared
//! ad hoc there (`hsnCode`, `gstRate`, `invoiceNumber`, `paymentMethod`,
//! line-item `name`/`price` snapshots) are modeled as `Option` rather than
//! implicit presence checks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::{Money, Rate};

// =============================================================================
// Customer
// =============================================================================

/// A wholesale customer with a running outstanding balance.
///
/// `balance` is signed: positive means the customer owes the shop,
/// negative means the shop owes the customer credit. It is updated only
/// by sale settlement math, never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier, assigned by the record store.
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    /// Signed running balance (outstanding amount).
    pub balance: Money,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned by the record store.
    pub id: u64,
    pub name: String,
    /// Unit price. Always positive for a valid catalog entry.
    pub price: Money,
    /// Current stock level. Not decremented on sale, and not enforced
    /// non-negative at the sale boundary.
    pub stock: i64,
    pub description: String,
    pub category: String,
    /// HSN classification code, present only when entered on the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,
    /// Per-product GST rate, present only when entered on the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_rate: Option<Rate>,
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry within a sale.
///
/// Uses the snapshot pattern: `name` and `price` are frozen at the time of
/// sale so that later catalog edits don't rewrite history. Records created
/// by older versions carry only `subtotal`; renderers then fall back to the
/// catalog name and to `subtotal / quantity` for the unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: u64,
    /// Product name at time of sale (frozen), if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unit price at time of sale (frozen), if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    pub quantity: i64,
    /// Line total: `price * quantity` at the time of sale.
    pub subtotal: Money,
}

impl LineItem {
    /// Builds a line item from a catalog product, snapshotting name and
    /// price and computing the subtotal.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        LineItem {
            product_id: product.id,
            name: Some(product.name.clone()),
            price: Some(product.price),
            quantity,
            subtotal: product.price.times(quantity),
        }
    }

    /// Unit price for display: the frozen snapshot when present, otherwise
    /// reconstructed as `subtotal / quantity`.
    pub fn unit_price(&self) -> Money {
        self.price
            .unwrap_or_else(|| self.subtotal.divided_by(self.quantity))
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was settled. Appears only on records written by the
/// customer-ledger flow; counter sales leave it unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Online,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Credit,
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale invoice.
///
/// Immutable once created: there is no edit or delete path. References to
/// Customer and Product are weak (by id); the referenced record may have
/// been deleted since.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: u64,
    pub date: NaiveDate,
    /// Linked customer, or `None` for a walk-in sale.
    pub customer_id: Option<u64>,
    /// Ordered line items.
    pub products: Vec<LineItem>,
    /// Grand total: `subtotal - discount_amount + tax_amount`.
    pub total: Money,
    /// Invoice-level discount rate.
    #[serde(default)]
    pub discount: Rate,
    /// Invoice-level tax rate.
    #[serde(default)]
    pub tax: Rate,
    /// Amount collected at the counter. Never exceeds `total`.
    #[serde(default)]
    pub amount_paid: Money,
    /// Display invoice number, when one was assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}

// =============================================================================
// Sale Draft
// =============================================================================

/// Input to the sale commit flow: everything the cashier entered, before
/// ids and totals are assigned.
#[derive(Debug, Clone)]
pub struct SaleDraft {
    pub date: NaiveDate,
    pub customer_id: Option<u64>,
    pub items: Vec<LineItem>,
    pub discount: Rate,
    pub tax: Rate,
    pub amount_paid: Money,
    pub payment_method: Option<PaymentMethod>,
}

// =============================================================================
// Settings
// =============================================================================

/// Shop settings. A singleton record, updated by partial merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub shop_name: String,
    pub gst_number: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    /// Default tax rate offered on the new-sale form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Rate>,
}

impl Settings {
    /// Applies a partial update, keeping current values for fields the
    /// patch leaves unset.
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(shop_name) = patch.shop_name {
            self.shop_name = shop_name;
        }
        if let Some(gst_number) = patch.gst_number {
            self.gst_number = gst_number;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(owner_name) = patch.owner_name {
            self.owner_name = Some(owner_name);
        }
        if let Some(tax_rate) = patch.tax_rate {
            self.tax_rate = Some(tax_rate);
        }
    }
}

/// A partial settings update. Every field is optional; unset fields keep
/// their current value (spread-merge semantics).
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub shop_name: Option<String>,
    pub gst_number: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub owner_name: Option<String>,
    pub tax_rate: Option<Rate>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: 4,
            name: "Pan Masala Rajnigandha".to_string(),
            price: Money::from_rupees(180),
            stock: 300,
            description: "Premium pan masala pouch 50g".to_string(),
            category: "Pan Masala".to_string(),
            hsn_code: None,
            gst_rate: None,
        }
    }

    #[test]
    fn test_line_item_from_product() {
        let item = LineItem::from_product(&product(), 10);
        assert_eq!(item.product_id, 4);
        assert_eq!(item.name.as_deref(), Some("Pan Masala Rajnigandha"));
        assert_eq!(item.subtotal, Money::from_rupees(1800));
        assert_eq!(item.unit_price(), Money::from_rupees(180));
    }

    #[test]
    fn test_unit_price_falls_back_to_subtotal_division() {
        // Older records carry no price snapshot
        let item = LineItem {
            product_id: 3,
            name: None,
            price: None,
            quantity: 20,
            subtotal: Money::from_rupees(1000),
        };
        assert_eq!(item.unit_price(), Money::from_rupees(50));
    }

    #[test]
    fn test_settings_merge_is_partial() {
        let mut settings = Settings {
            shop_name: "Shree Tobacco Traders".to_string(),
            gst_number: "GSTMP1234567".to_string(),
            phone: "9998887770".to_string(),
            address: "Plot 45, Wholesale Market, Indore, MP".to_string(),
            email: "shreetobacco@example.com".to_string(),
            owner_name: None,
            tax_rate: None,
        };

        settings.merge(SettingsPatch {
            phone: Some("9998887771".to_string()),
            tax_rate: Some(Rate::from_percent(18.0)),
            ..SettingsPatch::default()
        });

        assert_eq!(settings.phone, "9998887771");
        assert_eq!(settings.tax_rate, Some(Rate::from_bps(1800)));
        // Untouched fields survive the merge
        assert_eq!(settings.shop_name, "Shree Tobacco Traders");
        assert_eq!(settings.email, "shreetobacco@example.com");
    }

    #[test]
    fn test_sale_wire_format_defaults() {
        // A record written by an older version: no discount/tax/amountPaid
        let json = r#"{
            "id": 2,
            "date": "2025-08-22",
            "customerId": 2,
            "products": [{ "productId": 3, "quantity": 20, "subtotal": 100000 }],
            "total": 100000
        }"#;
        let sale: Sale = serde_json::from_str(json).expect("legacy sale parses");
        assert_eq!(sale.discount, Rate::zero());
        assert_eq!(sale.tax, Rate::zero());
        assert_eq!(sale.amount_paid, Money::zero());
        assert!(sale.products[0].price.is_none());
    }

    #[test]
    fn test_payment_method_wire_names() {
        let json = "\"Bank Transfer\"";
        let method: PaymentMethod = serde_json::from_str(json).expect("parses");
        assert_eq!(method, PaymentMethod::BankTransfer);
    }
}

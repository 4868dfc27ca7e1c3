//! # Ledger Engine
//!
//! Invoice totals computation and customer settlement math.
//!
//! ## Computation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Invoice Computation                                  │
//! │                                                                         │
//! │  subtotal        = Σ line.subtotal        (price × quantity per line)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  discount_amount = subtotal × discount%                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tax_amount      = (subtotal − discount_amount) × tax%                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total           = subtotal − discount_amount + tax_amount             │
//! │                                                                         │
//! │  Discount applies before tax; tax is charged on the discounted base.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Settlement
//! Whatever the customer does not pay at the counter is added to their
//! running balance: `new_balance = old_balance + (total - amount_paid)`.
//! The amount paid may never exceed the total; that case is rejected before
//! anything is committed.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Rate};
use crate::types::LineItem;

// =============================================================================
// Invoice Totals
// =============================================================================

/// The derived totals block of an invoice.
///
/// Invariant: `total == subtotal - discount_amount + tax_amount`, by
/// construction. For non-negative inputs, `discount_amount` and
/// `tax_amount` are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub discount_amount: Money,
    pub tax_amount: Money,
    pub total: Money,
}

/// Computes the totals block for a set of line items.
///
/// Pure function: the line items carry their subtotals already
/// (`price × quantity`, frozen at entry time), so this only aggregates
/// and applies the invoice-level rates.
///
/// ## Example
/// ```rust
/// use dukaan_core::ledger::compute_invoice;
/// use dukaan_core::money::{Money, Rate};
/// use dukaan_core::types::LineItem;
///
/// let items = vec![LineItem {
///     product_id: 1,
///     name: None,
///     price: Some(Money::from_rupees(100)),
///     quantity: 2,
///     subtotal: Money::from_rupees(200),
/// }];
///
/// let totals = compute_invoice(&items, Rate::from_percent(10.0), Rate::from_percent(5.0));
/// assert_eq!(totals.total, Money::from_rupees(189));
/// ```
pub fn compute_invoice(items: &[LineItem], discount: Rate, tax: Rate) -> InvoiceTotals {
    let subtotal: Money = items.iter().map(|item| item.subtotal).sum();
    let discount_amount = subtotal.apply_rate(discount);
    let tax_amount = (subtotal - discount_amount).apply_rate(tax);
    let total = subtotal - discount_amount + tax_amount;

    InvoiceTotals {
        subtotal,
        discount_amount,
        tax_amount,
        total,
    }
}

// =============================================================================
// Settlement
// =============================================================================

/// Rejects a payment that exceeds the invoice total.
///
/// Runs before commit; a violation leaves no partial state change.
pub fn check_payment(amount_paid: Money, total: Money) -> CoreResult<()> {
    if amount_paid > total {
        return Err(CoreError::PaymentExceedsTotal {
            paid: amount_paid,
            total,
        });
    }
    Ok(())
}

/// The amount a sale adds to the customer's outstanding balance.
#[inline]
pub fn outstanding_addition(total: Money, amount_paid: Money) -> Money {
    total - amount_paid
}

/// The customer's balance after settling a sale.
#[inline]
pub fn settled_balance(old_balance: Money, total: Money, amount_paid: Money) -> Money {
    old_balance + outstanding_addition(total, amount_paid)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price_rupees: i64, quantity: i64) -> LineItem {
        let price = Money::from_rupees(price_rupees);
        LineItem {
            product_id: 1,
            name: None,
            price: Some(price),
            quantity,
            subtotal: price.times(quantity),
        }
    }

    /// The worked scenario: ₹100 × 2, 10% discount, 5% tax.
    #[test]
    fn test_reference_scenario() {
        let items = vec![item(100, 2)];
        let totals = compute_invoice(&items, Rate::from_percent(10.0), Rate::from_percent(5.0));

        assert_eq!(totals.subtotal, Money::from_rupees(200));
        assert_eq!(totals.discount_amount, Money::from_rupees(20));
        // Tax applies to the discounted base: (200 - 20) × 5% = 9
        assert_eq!(totals.tax_amount, Money::from_rupees(9));
        assert_eq!(totals.total, Money::from_rupees(189));
    }

    #[test]
    fn test_totals_identity_holds() {
        let items = vec![item(350, 5), item(50, 20), item(10, 50)];
        for (d, t) in [(0u32, 0u32), (1000, 500), (825, 1800), (10000, 3000)] {
            let totals = compute_invoice(&items, Rate::from_bps(d), Rate::from_bps(t));
            assert_eq!(
                totals.total,
                totals.subtotal - totals.discount_amount + totals.tax_amount
            );
            assert!(!totals.discount_amount.is_negative());
            assert!(!totals.tax_amount.is_negative());
        }
    }

    #[test]
    fn test_zero_rates() {
        let items = vec![item(320, 3)];
        let totals = compute_invoice(&items, Rate::zero(), Rate::zero());
        assert_eq!(totals.subtotal, Money::from_rupees(960));
        assert_eq!(totals.discount_amount, Money::zero());
        assert_eq!(totals.tax_amount, Money::zero());
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_empty_items_sum_to_zero() {
        let totals = compute_invoice(&[], Rate::from_percent(10.0), Rate::from_percent(5.0));
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_full_discount() {
        let items = vec![item(100, 1)];
        let totals = compute_invoice(&items, Rate::from_percent(100.0), Rate::from_percent(18.0));
        assert_eq!(totals.discount_amount, Money::from_rupees(100));
        // Nothing left to tax
        assert_eq!(totals.tax_amount, Money::zero());
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_check_payment() {
        let total = Money::from_rupees(189);
        assert!(check_payment(Money::from_rupees(189), total).is_ok());
        assert!(check_payment(Money::zero(), total).is_ok());

        let err = check_payment(Money::from_rupees(190), total).unwrap_err();
        assert!(matches!(err, CoreError::PaymentExceedsTotal { .. }));
    }

    #[test]
    fn test_settlement_math() {
        let total = Money::from_rupees(1750);
        let paid = Money::from_rupees(1000);
        assert_eq!(outstanding_addition(total, paid), Money::from_rupees(750));
        assert_eq!(
            settled_balance(Money::from_rupees(2500), total, paid),
            Money::from_rupees(3250)
        );
    }

    #[test]
    fn test_settlement_paid_in_full() {
        let total = Money::from_rupees(1460);
        assert_eq!(
            settled_balance(Money::from_rupees(100), total, total),
            Money::from_rupees(100)
        );
    }
}

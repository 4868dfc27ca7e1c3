//! # Aggregation & Reporting
//!
//! Read-only dashboard metrics derived by scanning the full collections.
//! Every function here is recomputed on demand; there is no caching and no
//! incremental update, which is fine at the record counts this system sees.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::money::Money;
use crate::types::{Customer, Product, Sale};

// =============================================================================
// Thresholds
// =============================================================================

/// Dashboard "low stock" alert threshold.
///
/// Deliberately different from [`CATALOG_LOW_STOCK_THRESHOLD`]: the two
/// call sites use different cutoffs and are kept as distinct constants.
pub const DASHBOARD_LOW_STOCK_THRESHOLD: i64 = 30;

/// Product-list "low stock" filter threshold.
pub const CATALOG_LOW_STOCK_THRESHOLD: i64 = 10;

/// Number of customers shown in the top-customers chart.
pub const TOP_CUSTOMERS_LIMIT: usize = 5;

// =============================================================================
// Sales Metrics
// =============================================================================

/// Returns true when `date` falls within `[start, end]`, inclusive on both
/// bounds. A sale dated exactly `end` is part of the period.
#[inline]
fn in_period(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    date >= start && date <= end
}

/// Sum of sale totals within the period.
pub fn period_sales(sales: &[Sale], start: NaiveDate, end: NaiveDate) -> Money {
    sales
        .iter()
        .filter(|s| in_period(s.date, start, end))
        .map(|s| s.total)
        .sum()
}

/// All-time sum of sale totals.
pub fn total_sales(sales: &[Sale]) -> Money {
    sales.iter().map(|s| s.total).sum()
}

/// Per-day sales totals within the period, ordered by date.
pub fn sales_by_date(sales: &[Sale], start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, Money)> {
    let mut by_date: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for sale in sales.iter().filter(|s| in_period(s.date, start, end)) {
        *by_date.entry(sale.date).or_insert_with(Money::zero) += sale.total;
    }
    by_date.into_iter().collect()
}

// =============================================================================
// Stock Metrics
// =============================================================================

/// Count of products below the dashboard low-stock threshold (stock < 30).
pub fn low_stock_count(products: &[Product]) -> usize {
    products
        .iter()
        .filter(|p| p.stock < DASHBOARD_LOW_STOCK_THRESHOLD)
        .count()
}

/// Products below the catalog low-stock threshold (stock < 10).
pub fn catalog_low_stock(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.stock < CATALOG_LOW_STOCK_THRESHOLD)
        .collect()
}

/// Products with no stock at all.
pub fn out_of_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.stock == 0).collect()
}

/// Products with any stock.
pub fn in_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.stock > 0).collect()
}

// =============================================================================
// Customer Metrics
// =============================================================================

/// Sum of all customer balances. Can be negative in aggregate when the shop
/// owes more credit than customers owe outstanding.
pub fn outstanding_total(customers: &[Customer]) -> Money {
    customers.iter().map(|c| c.balance).sum()
}

/// One bar of the top-customers chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerSales {
    pub customer_id: u64,
    pub name: String,
    pub total: Money,
}

/// Per-customer sum of sale totals within the period, sorted descending and
/// truncated to [`TOP_CUSTOMERS_LIMIT`]. Customers with no sales in the
/// period are excluded.
pub fn top_customers(
    sales: &[Sale],
    customers: &[Customer],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<CustomerSales> {
    let mut ranked: Vec<CustomerSales> = customers
        .iter()
        .map(|c| CustomerSales {
            customer_id: c.id,
            name: c.name.clone(),
            total: sales
                .iter()
                .filter(|s| s.customer_id == Some(c.id) && in_period(s.date, start, end))
                .map(|s| s.total)
                .sum(),
        })
        .filter(|entry| entry.total.is_positive())
        .collect();

    // Stable sort keeps collection order for equal totals
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    ranked.truncate(TOP_CUSTOMERS_LIMIT);
    ranked
}

// =============================================================================
// Category Distribution
// =============================================================================

/// One slice of the category pie chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySlice {
    pub name: String,
    pub count: usize,
    /// Deterministic display hue in `[0, 360)`, derived from the name.
    pub hue: u16,
}

/// Derives a hue from a category name.
///
/// Same accumulator as the classic string hash (`hash * 31 + char`), with
/// `rem_euclid` so the result stays in `[0, 360)` even when the wrapped
/// hash goes negative.
pub fn category_hue(name: &str) -> u16 {
    let mut hash: i32 = 0;
    for c in name.chars() {
        hash = (c as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash));
    }
    hash.rem_euclid(360) as u16
}

/// Groups products by category with a count and display hue per group,
/// ordered by category name.
pub fn category_distribution(products: &[Product]) -> Vec<CategorySlice> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for product in products {
        *counts.entry(product.category.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(name, count)| CategorySlice {
            name: name.to_string(),
            count,
            hue: category_hue(name),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

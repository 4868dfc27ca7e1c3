//! # Default Fixtures
//!
//! The sample dataset the store falls back to when a collection has never
//! been persisted, matching the original application's built-in records.
//! Also used by the `seed` binary to populate a fresh data directory.

use chrono::NaiveDate;

use dukaan_core::money::{Money, Rate};
use dukaan_core::types::{Customer, LineItem, Product, Sale, Settings};

fn fixture_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture date is valid")
}

/// Default customer records.
pub fn default_customers() -> Vec<Customer> {
    vec![
        Customer {
            id: 1,
            name: "Sharma Pan Bhandar".to_string(),
            phone: "9876543210".to_string(),
            address: "15 MG Road, Indore, MP".to_string(),
            email: "sharma.pan@example.com".to_string(),
            balance: Money::from_rupees(2500),
        },
        Customer {
            id: 2,
            name: "Gupta General Store".to_string(),
            phone: "9123456780".to_string(),
            address: "22 Nehru Nagar, Bhopal, MP".to_string(),
            email: "gupta.store@example.com".to_string(),
            balance: Money::from_rupees(1200),
        },
        Customer {
            id: 3,
            name: "Patel Kirana & Pan Shop".to_string(),
            phone: "9988776655".to_string(),
            address: "Station Road, Nagpur, MH".to_string(),
            email: "patel.kirana@example.com".to_string(),
            balance: Money::zero(),
        },
    ]
}

/// Default product catalog.
pub fn default_products() -> Vec<Product> {
    let entry = |id, name: &str, price, stock, description: &str, category: &str| Product {
        id,
        name: name.to_string(),
        price: Money::from_rupees(price),
        stock,
        description: description.to_string(),
        category: category.to_string(),
        hsn_code: None,
        gst_rate: None,
    };

    vec![
        entry(1, "Gold Flake Kings", 350, 200, "Premium cigarette pack of 20 sticks", "Cigarettes"),
        entry(2, "Classic Milds", 320, 150, "Mild cigarette pack of 20 sticks", "Cigarettes"),
        entry(3, "Bidi (Tendu Leaves)", 50, 1000, "Local handmade bidi bundle (25 sticks)", "Bidi"),
        entry(4, "Pan Masala Rajnigandha", 180, 300, "Premium pan masala pouch 50g", "Pan Masala"),
        entry(5, "Gutkha Vimal", 10, 2000, "Single pouch gutkha 5g", "Gutkha"),
        entry(6, "Cigar (Imported)", 1200, 30, "Premium imported hand-rolled cigar", "Cigars"),
    ]
}

/// Default sale history.
///
/// These records predate line-item snapshots, so they carry only
/// `productId`, `quantity`, and `subtotal` per line. Renderers resolve the
/// rest through the catalog.
pub fn default_sales() -> Vec<Sale> {
    let item = |product_id, quantity, subtotal| LineItem {
        product_id,
        name: None,
        price: None,
        quantity,
        subtotal: Money::from_rupees(subtotal),
    };
    let sale = |id, day, customer_id, products: Vec<LineItem>, total| Sale {
        id,
        date: fixture_date(2025, 8, day),
        customer_id: Some(customer_id),
        products,
        total: Money::from_rupees(total),
        discount: Rate::zero(),
        tax: Rate::zero(),
        amount_paid: Money::zero(),
        invoice_number: None,
        payment_method: None,
    };

    vec![
        sale(1, 23, 1, vec![item(1, 5, 1750)], 1750),
        sale(2, 22, 2, vec![item(3, 20, 1000)], 1000),
        sale(3, 21, 3, vec![item(2, 3, 960), item(5, 50, 500)], 1460),
        sale(4, 20, 1, vec![item(4, 10, 1800)], 1800),
    ]
}

/// Default shop settings.
pub fn default_settings() -> Settings {
    Settings {
        shop_name: "Shree Tobacco Traders".to_string(),
        gst_number: "GSTMP1234567".to_string(),
        phone: "9998887770".to_string(),
        address: "Plot 45, Wholesale Market, Indore, MP".to_string(),
        email: "shreetobacco@example.com".to_string(),
        owner_name: None,
        tax_rate: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_ids_are_sequential() {
        let ids: Vec<u64> = default_customers().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let ids: Vec<u64> = default_products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        let ids: Vec<u64> = default_sales().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_fixture_sale_totals_match_line_sums() {
        for sale in default_sales() {
            let sum: Money = sale.products.iter().map(|p| p.subtotal).sum();
            assert_eq!(sum, sale.total, "sale {} total mismatch", sale.id);
        }
    }
}

//! # Validation Module
//!
//! Input validation rules for Dukaan POS.
//!
//! The form layer collects user input and runs these checks before calling
//! any store mutator; the store itself trusts its inputs are already
//! validated. A failed rule is reported inline at the form and the
//! operation is never attempted.

use crate::error::ValidationError;
use crate::money::{Money, Rate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Limits
// =============================================================================

/// Maximum tax rate accepted on the new-sale form, in basis points (30%).
pub const MAX_TAX_BPS: u32 = 3000;

/// Maximum discount, in basis points (100%).
pub const MAX_DISCOUNT_BPS: u32 = 10000;

const MAX_NAME_LEN: usize = 100;
const PHONE_DIGITS: usize = 10;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer or product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Must be exactly 10 digits (the mobile format the forms accept)
///
/// ## Example
/// ```rust
/// use dukaan_core::validation::validate_phone;
///
/// assert!(validate_phone("9876543210").is_ok());
/// assert!(validate_phone("98765").is_err());
/// assert!(validate_phone("98765-43210").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone.len() != PHONE_DIGITS || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: format!("must be {} digits", PHONE_DIGITS),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product price. Zero-priced catalog entries are not allowed.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a stock level. Negative stock is rejected at the form; note
/// that sales themselves do not decrement stock, so this is the only gate.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a line-item quantity.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates an invoice discount rate (0% to 100%).
pub fn validate_discount(rate: Rate) -> ValidationResult<()> {
    if rate.bps() > MAX_DISCOUNT_BPS {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: MAX_DISCOUNT_BPS as i64,
        });
    }
    Ok(())
}

/// Validates an invoice tax rate (0% to 30%, the new-sale form's bound).
pub fn validate_tax(rate: Rate) -> ValidationResult<()> {
    if rate.bps() > MAX_TAX_BPS {
        return Err(ValidationError::OutOfRange {
            field: "tax".to_string(),
            min: 0,
            max: MAX_TAX_BPS as i64,
        });
    }
    Ok(())
}

/// Validates an amount-paid entry. Zero is fine (full credit sale);
/// negative is not.
pub fn validate_amount_paid(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "amount paid".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Sharma Pan Bhandar").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone(" 9876543210 ").is_ok());

        assert!(validate_phone("").is_err());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("98765432101").is_err());
        assert!(validate_phone("98765abcde").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_rupees(350)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_rupees(-10)).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(2000).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-5).is_err());
    }

    #[test]
    fn test_validate_rates() {
        assert!(validate_discount(Rate::from_percent(0.0)).is_ok());
        assert!(validate_discount(Rate::from_percent(100.0)).is_ok());
        assert!(validate_discount(Rate::from_bps(10001)).is_err());

        assert!(validate_tax(Rate::from_percent(18.0)).is_ok());
        assert!(validate_tax(Rate::from_percent(30.0)).is_ok());
        assert!(validate_tax(Rate::from_percent(31.0)).is_err());
    }

    #[test]
    fn test_validate_amount_paid() {
        assert!(validate_amount_paid(Money::zero()).is_ok());
        assert!(validate_amount_paid(Money::from_rupees(100)).is_ok());
        assert!(validate_amount_paid(Money::from_paise(-1)).is_err());
    }
}

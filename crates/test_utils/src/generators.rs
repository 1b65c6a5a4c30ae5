//! Property-Based Test Data Generators
//!
//! Proptest strategies for domain value types, shared by the
//! property suites across crates.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, Money, Rate};

/// Positive XOF amounts in a realistic order range
pub fn order_amounts() -> impl Strategy<Value = Money> {
    (10_000i64..2_000_000_000i64).prop_map(|n| Money::new(Decimal::new(n, 0), Currency::XOF))
}

/// Positive NAV values with up to two decimal places
pub fn nav_values() -> impl Strategy<Value = Decimal> {
    (100i64..100_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Fee rates between 0% and 10%
pub fn fee_rates() -> impl Strategy<Value = Rate> {
    (0i64..1000i64).prop_map(|n| Rate::from_percentage(Decimal::new(n, 2)))
}

/// Whole unit counts for redemption requests
pub fn unit_counts() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 0))
}

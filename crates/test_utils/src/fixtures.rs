//! Test Data Fixtures
//!
//! Pre-built values for common test scenarios, so individual tests only
//! spell out what they actually exercise.

use chrono::NaiveDate;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, Rate};
use domain_fund::Investor;

/// Common monetary values
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The fund currency used throughout the fixtures
    pub fn currency() -> Currency {
        Currency::XOF
    }

    /// An XOF amount
    pub fn xof(amount: i64) -> Money {
        Money::new(Decimal::new(amount, 0), Currency::XOF)
    }

    /// The reference subscription amount (1,000,000)
    pub fn subscription_amount() -> Money {
        Self::xof(1_000_000)
    }

    /// The reference NAV per unit (10,000)
    pub fn nav_per_unit() -> Decimal {
        dec!(10000)
    }

    /// The reference entry fee (1%)
    pub fn subscription_fee() -> Rate {
        Rate::from_percentage(dec!(1))
    }

    /// The reference exit fee (2%)
    pub fn redemption_fee() -> Rate {
        Rate::from_percentage(dec!(2))
    }
}

/// Common dates
pub struct DateFixtures;

impl DateFixtures {
    /// The fund launch date
    pub fn launch_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    /// The standing "today" of the test suite
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 3).unwrap()
    }

    /// The next valuation date after [`DateFixtures::today`]
    pub fn next_valuation() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 4).unwrap()
    }
}

/// Investor fixtures
pub struct InvestorFixtures;

impl InvestorFixtures {
    /// A KYC-compliant investor with a generated name
    pub fn compliant() -> Investor {
        let mut investor = Investor::new(Name().fake::<String>());
        investor.mark_compliant();
        investor
    }

    /// An investor whose KYC checks failed
    pub fn non_compliant() -> Investor {
        let mut investor = Investor::new(Name().fake::<String>());
        investor.mark_non_compliant();
        investor
    }
}

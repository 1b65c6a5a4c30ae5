//! Fund Domain
//!
//! This crate implements fund master data for the order settlement engine:
//! fee policy, investor eligibility, cash/unit accounts, and NAV quotes.
//!
//! # Key Concepts
//!
//! - **Fund**: an investment vehicle with a fee policy and a fractional-units rule
//! - **NAV**: Net Asset Value per unit, published per valuation date and
//!   applied to orders only once validated
//! - **CashAccount / UnitAccount**: one of each per (investor, fund); neither
//!   stores a balance - balances are derived from the ledger
//! - **InvestorRegistry**: the compliance view of who may trade which fund
//!
//! # Unit Precision
//!
//! Units are quoted with 4 decimal places:
//! - Amount: 1,000 at NAV 15.45 with fractional units allowed
//! - Units: 64.7249

pub mod fund;
pub mod account;
pub mod investor;
pub mod nav;
pub mod error;

pub use fund::{Fund, FundKind, FundState, RiskLevel, NavFrequency, FeePolicy, RedemptionDelay};
pub use account::{CashAccount, UnitAccount, AccountState};
pub use investor::{Investor, KycStatus, FundRegistration, EligibilityState, InvestorRegistry};
pub use nav::{NavQuote, NavState, NavHistory, NavBoard, NavQuoteProvider};
pub use error::FundError;

use rust_decimal::Decimal;

/// Standard unit precision (4 decimal places)
pub const UNIT_PRECISION: u32 = 4;

/// Rounds a unit quantity to standard unit precision
pub fn round_units(value: Decimal) -> Decimal {
    value.round_dp(UNIT_PRECISION)
}

/// Calculates the value of units at a given NAV, rounded to 4 decimal places
pub fn calculate_value(units: Decimal, nav: Decimal) -> Decimal {
    (units * nav).round_dp(UNIT_PRECISION)
}

//! Order domain errors
//!
//! The taxonomy mirrors the guard structure: input validation fails
//! before any state mutation, policy checks fail at the transition that
//! needs the resource, staleness is recoverable through re-confirmation,
//! and invariant violations (double settlement, cancelling a settled
//! order) are workflow errors.

use rust_decimal::Decimal;
use thiserror::Error;

use domain_ledger::LedgerError;

use crate::quantize::QuantizeError;

/// Errors that can occur in the order domain
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Invalid order transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Order already settled: {0}")]
    AlreadySettled(String),

    #[error("Fund is not open for orders: {0}")]
    FundNotOpen(String),

    #[error("Account is not active: {0}")]
    AccountNotActive(String),

    #[error("Account {account} does not belong to fund {fund}")]
    AccountFundMismatch { account: String, fund: String },

    #[error("Accounts {cash_account} and {unit_account} belong to different investors")]
    AccountPairMismatch {
        cash_account: String,
        unit_account: String,
    },

    #[error("Order currency {order} does not match fund currency {fund}")]
    CurrencyMismatch { fund: String, order: String },

    #[error("No validated NAV quote for fund {0}")]
    NavNotValidated(String),

    #[error("NAV quote is for fund {actual}, expected {expected}")]
    NavFundMismatch { expected: String, actual: String },

    #[error("NAV changed since capture: captured {captured}, current {current}")]
    StaleNav { captured: Decimal, current: Decimal },

    #[error("Confirmation does not belong to order {order}")]
    ConfirmationMismatch { order: String },

    #[error("Insufficient cash balance: available {available}, required {required}")]
    InsufficientFunds { available: Decimal, required: Decimal },

    #[error("Insufficient units: available {available}, requested {requested}")]
    InsufficientUnits { available: Decimal, requested: Decimal },

    #[error("Investor {investor} is not eligible for fund {fund}")]
    InvestorNotEligible { investor: String, fund: String },

    #[error(transparent)]
    Quantize(#[from] QuantizeError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

//! Fixed-income domain errors

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the fixed-income domain
#[derive(Debug, Error)]
pub enum BondError {
    #[error("Value date {value} cannot be before issue date {issue}")]
    ValueBeforeIssue { issue: NaiveDate, value: NaiveDate },

    #[error("Maturity date {maturity} must be after value date {value}")]
    MaturityNotAfterValue { value: NaiveDate, maturity: NaiveDate },

    #[error("Coupon rate must be between 0% and 50%, got {0}")]
    CouponRateOutOfRange(Decimal),

    #[error("Market price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    #[error("No cash flows remain after {0}")]
    NoRemainingCashFlows(NaiveDate),

    #[error("Adjustment ratio must be positive, got {0}")]
    NonPositiveAdjustmentRatio(Decimal),

    #[error("Quantity ratio cannot be negative, got {0}")]
    NegativeQuantityRatio(Decimal),

    #[error("Invalid event transition: {from} -> {to}")]
    InvalidEventTransition { from: String, to: String },

    #[error("Event dates are inconsistent: {0}")]
    InconsistentEventDates(String),
}

//! Fund domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::fund::FundState;

/// Errors that can occur in the fund domain
#[derive(Debug, Error)]
pub enum FundError {
    #[error("Fund not found: {0}")]
    FundNotFound(String),

    #[error("Fund has no launch date set")]
    MissingLaunchDate,

    #[error("Invalid fund state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Invalid account state transition: {from} -> {to}")]
    InvalidAccountTransition { from: String, to: String },

    #[error("Investor {investor} is already registered with fund {fund}")]
    AlreadyRegistered { investor: String, fund: String },

    #[error("No registration found for investor {investor} with fund {fund}")]
    RegistrationNotFound { investor: String, fund: String },

    #[error("NAV value must be positive, got {0}")]
    InvalidNavValue(Decimal),

    #[error("No validated NAV available: {0}")]
    NavNotFound(String),
}

impl FundError {
    pub(crate) fn invalid_transition(from: FundState, to: FundState) -> Self {
        FundError::InvalidTransition {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }
}

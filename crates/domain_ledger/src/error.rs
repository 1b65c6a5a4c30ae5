//! Ledger domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Entry amounts must be strictly positive
    #[error("Entry amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Entry unit quantities must be strictly positive
    #[error("Entry unit quantity must be positive, got {0}")]
    NonPositiveUnits(Decimal),

    /// Entry currency does not match the book currency
    #[error("Currency mismatch: ledger is {ledger}, entry is {entry}")]
    CurrencyMismatch { ledger: String, entry: String },

    /// A settlement batch must carry at least one entry
    #[error("Settlement batch is empty")]
    EmptyBatch,

    /// Arithmetic error during balance derivation
    #[error("Calculation error: {0}")]
    Calculation(#[from] MoneyError),
}

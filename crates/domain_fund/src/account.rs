//! Investor cash and unit accounts
//!
//! One cash account and one unit account exist per (investor, fund) pair.
//! Neither carries a balance field: cash balances and unit holdings are
//! derived from the ledger at read time, so there is no counter to race on.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CashAccountId, Currency, FundId, InvestorId, UnitAccountId};

use crate::error::FundError;

/// Account lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountState {
    /// Opened but not yet usable
    Draft,
    /// Usable for operations
    Active,
    /// Blocked for operations
    Suspended,
}

/// An investor's cash account with a fund
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashAccount {
    /// Unique identifier
    pub id: CashAccountId,
    /// Account number, unique per fund
    pub account_number: String,
    /// Owning investor
    pub investor_id: InvestorId,
    /// Fund the account belongs to
    pub fund_id: FundId,
    /// Account currency (the fund's currency)
    pub currency: Currency,
    /// Lifecycle state
    pub state: AccountState,
    /// Date the account was activated
    pub opened_on: Option<NaiveDate>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl CashAccount {
    /// Opens a new cash account in `Draft` state
    pub fn new(
        account_number: impl Into<String>,
        investor_id: InvestorId,
        fund_id: FundId,
        currency: Currency,
    ) -> Self {
        Self {
            id: CashAccountId::new_v7(),
            account_number: account_number.into(),
            investor_id,
            fund_id,
            currency,
            state: AccountState::Draft,
            opened_on: None,
            created_at: Utc::now(),
        }
    }

    /// Activates the account
    pub fn activate(&mut self, on: NaiveDate) -> Result<(), FundError> {
        match self.state {
            AccountState::Draft | AccountState::Suspended => {
                self.state = AccountState::Active;
                self.opened_on.get_or_insert(on);
                Ok(())
            }
            AccountState::Active => Err(FundError::InvalidAccountTransition {
                from: "Active".to_string(),
                to: "Active".to_string(),
            }),
        }
    }

    /// Suspends the account
    pub fn suspend(&mut self) -> Result<(), FundError> {
        match self.state {
            AccountState::Active => {
                self.state = AccountState::Suspended;
                Ok(())
            }
            from => Err(FundError::InvalidAccountTransition {
                from: format!("{from:?}"),
                to: "Suspended".to_string(),
            }),
        }
    }

    /// True if the account may be used for operations
    pub fn is_active(&self) -> bool {
        self.state == AccountState::Active
    }
}

/// An investor's unit (securities) account with a fund
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitAccount {
    /// Unique identifier
    pub id: UnitAccountId,
    /// Account number, unique per fund
    pub account_number: String,
    /// Owning investor
    pub investor_id: InvestorId,
    /// Fund the account belongs to
    pub fund_id: FundId,
    /// Lifecycle state
    pub state: AccountState,
    /// Date the account was activated
    pub opened_on: Option<NaiveDate>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl UnitAccount {
    /// Opens a new unit account in `Draft` state
    pub fn new(
        account_number: impl Into<String>,
        investor_id: InvestorId,
        fund_id: FundId,
    ) -> Self {
        Self {
            id: UnitAccountId::new_v7(),
            account_number: account_number.into(),
            investor_id,
            fund_id,
            state: AccountState::Draft,
            opened_on: None,
            created_at: Utc::now(),
        }
    }

    /// Activates the account
    pub fn activate(&mut self, on: NaiveDate) -> Result<(), FundError> {
        match self.state {
            AccountState::Draft | AccountState::Suspended => {
                self.state = AccountState::Active;
                self.opened_on.get_or_insert(on);
                Ok(())
            }
            AccountState::Active => Err(FundError::InvalidAccountTransition {
                from: "Active".to_string(),
                to: "Active".to_string(),
            }),
        }
    }

    /// Suspends the account
    pub fn suspend(&mut self) -> Result<(), FundError> {
        match self.state {
            AccountState::Active => {
                self.state = AccountState::Suspended;
                Ok(())
            }
            from => Err(FundError::InvalidAccountTransition {
                from: format!("{from:?}"),
                to: "Suspended".to_string(),
            }),
        }
    }

    /// True if the account may be used for operations
    pub fn is_active(&self) -> bool {
        self.state == AccountState::Active
    }
}

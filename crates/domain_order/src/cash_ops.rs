//! Cash operations outside the order flow
//!
//! Deposits and withdrawals are the only ledger writes that do not come
//! from an order settlement. Both require an active account; withdrawals
//! additionally check the derived balance.

use tracing::debug;

use core_kernel::{CashEntryId, Money};
use domain_fund::CashAccount;
use domain_ledger::{CashEntry, CashEntryKind, Ledger};

use crate::error::OrderError;

/// Pays external money into a cash account
pub fn deposit(
    account: &CashAccount,
    amount: Money,
    ledger: &mut Ledger,
) -> Result<CashEntryId, OrderError> {
    if !account.is_active() {
        return Err(OrderError::AccountNotActive(account.account_number.clone()));
    }

    let id = ledger.post_cash(CashEntry::new(account.id, CashEntryKind::Deposit, amount))?;
    debug!(account = %account.account_number, amount = %amount, "deposit posted");
    Ok(id)
}

/// Pays money out of a cash account
///
/// Fails with `InsufficientFunds` when the derived balance does not cover
/// the amount.
pub fn withdraw(
    account: &CashAccount,
    amount: Money,
    ledger: &mut Ledger,
) -> Result<CashEntryId, OrderError> {
    if !account.is_active() {
        return Err(OrderError::AccountNotActive(account.account_number.clone()));
    }

    let balance = ledger.cash_balance(&account.id);
    if balance.amount() < amount.amount() {
        return Err(OrderError::InsufficientFunds {
            available: balance.amount(),
            required: amount.amount(),
        });
    }

    let id = ledger.post_cash(CashEntry::new(account.id, CashEntryKind::Withdraw, amount))?;
    debug!(account = %account.account_number, amount = %amount, "withdrawal posted");
    Ok(id)
}

//! Append-only ledger
//!
//! The ledger validates every entry before appending it and exposes
//! balances as read-time projections over the entry log.

use rust_decimal::Decimal;

use core_kernel::{CashAccountId, CashEntryId, Currency, Money, UnitAccountId, UnitEntryId};

use crate::entry::{CashEntry, UnitEntry};
use crate::error::LedgerError;

/// The movement store for one fund administration book
///
/// # Invariants
///
/// - Entries are never modified or removed once posted
/// - Balances are derived from entries on every read; there is no cached
///   counter to fall out of sync
/// - `post_settlement` appends a whole batch or nothing
#[derive(Debug)]
pub struct Ledger {
    /// Book currency; every cash entry must match
    currency: Currency,
    /// Cash movement log, in posting order
    cash_entries: Vec<CashEntry>,
    /// Unit movement log, in posting order
    unit_entries: Vec<UnitEntry>,
}

impl Ledger {
    /// Creates an empty ledger in the given currency
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            cash_entries: Vec::new(),
            unit_entries: Vec::new(),
        }
    }

    /// The book currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Posts a single cash entry
    ///
    /// # Errors
    ///
    /// Rejects non-positive amounts and currency mismatches; nothing is
    /// appended on error.
    pub fn post_cash(&mut self, entry: CashEntry) -> Result<CashEntryId, LedgerError> {
        self.check_cash(&entry)?;
        let id = entry.id;
        self.cash_entries.push(entry);
        Ok(id)
    }

    /// Posts a single unit entry
    ///
    /// # Errors
    ///
    /// Rejects non-positive unit quantities.
    pub fn post_units(&mut self, entry: UnitEntry) -> Result<UnitEntryId, LedgerError> {
        self.check_units(&entry)?;
        let id = entry.id;
        self.unit_entries.push(entry);
        Ok(id)
    }

    /// Posts a settlement batch atomically
    ///
    /// Every entry is validated before any entry is appended, so a failed
    /// settlement leaves no trace in the ledger.
    pub fn post_settlement(&mut self, batch: SettlementBatch) -> Result<(), LedgerError> {
        if batch.cash.is_empty() && batch.units.is_empty() {
            return Err(LedgerError::EmptyBatch);
        }
        for entry in &batch.cash {
            self.check_cash(entry)?;
        }
        for entry in &batch.units {
            self.check_units(entry)?;
        }

        self.cash_entries.extend(batch.cash);
        self.unit_entries.extend(batch.units);
        Ok(())
    }

    /// Cash balance of an account: the signed sum of its entries
    pub fn cash_balance(&self, account_id: &CashAccountId) -> Money {
        self.cash_entries
            .iter()
            .filter(|e| &e.account_id == account_id)
            .fold(Money::zero(self.currency), |acc, e| acc + e.signed_amount())
    }

    /// Unit holding of an account: the signed sum of its entries
    pub fn unit_balance(&self, account_id: &UnitAccountId) -> Decimal {
        self.unit_entries
            .iter()
            .filter(|e| &e.account_id == account_id)
            .map(|e| e.signed_units())
            .sum()
    }

    /// Cash statement for an account, in posting order
    pub fn cash_statement(&self, account_id: &CashAccountId) -> Vec<&CashEntry> {
        self.cash_entries
            .iter()
            .filter(|e| &e.account_id == account_id)
            .collect()
    }

    /// Unit statement for an account, in posting order
    pub fn unit_statement(&self, account_id: &UnitAccountId) -> Vec<&UnitEntry> {
        self.unit_entries
            .iter()
            .filter(|e| &e.account_id == account_id)
            .collect()
    }

    /// All cash entries, in posting order
    pub fn cash_entries(&self) -> &[CashEntry] {
        &self.cash_entries
    }

    /// All unit entries, in posting order
    pub fn unit_entries(&self) -> &[UnitEntry] {
        &self.unit_entries
    }

    fn check_cash(&self, entry: &CashEntry) -> Result<(), LedgerError> {
        if entry.amount.currency() != self.currency {
            return Err(LedgerError::CurrencyMismatch {
                ledger: self.currency.to_string(),
                entry: entry.amount.currency().to_string(),
            });
        }
        if !entry.amount.is_positive() {
            return Err(LedgerError::NonPositiveAmount(entry.amount.amount()));
        }
        Ok(())
    }

    fn check_units(&self, entry: &UnitEntry) -> Result<(), LedgerError> {
        if entry.units <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveUnits(entry.units));
        }
        Ok(())
    }
}

/// A set of entries to be appended all-or-nothing at settlement
#[derive(Debug, Default)]
pub struct SettlementBatch {
    cash: Vec<CashEntry>,
    units: Vec<UnitEntry>,
}

impl SettlementBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cash entry to the batch
    pub fn cash(mut self, entry: CashEntry) -> Self {
        self.cash.push(entry);
        self
    }

    /// Adds a unit entry to the batch
    pub fn units(mut self, entry: UnitEntry) -> Self {
        self.units.push(entry);
        self
    }

    /// Number of entries in the batch
    pub fn len(&self) -> usize {
        self.cash.len() + self.units.len()
    }

    /// True if the batch has no entries
    pub fn is_empty(&self) -> bool {
        self.cash.is_empty() && self.units.is_empty()
    }
}

//! Ledger entry types
//!
//! Entries are immutable records. Amounts and unit quantities are stored
//! positive; the direction of each movement is fixed by its kind.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{CashAccountId, CashEntryId, Money, UnitAccountId, UnitEntryId};

/// Direction of a movement relative to the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryDirection {
    /// Increases the account
    Credit,
    /// Decreases the account
    Debit,
}

/// Typed cash movements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashEntryKind {
    /// External money paid into the account
    Deposit,
    /// External money paid out of the account
    Withdraw,
    /// Subscription settlement: amount invested into units
    SubscriptionNet,
    /// Subscription settlement: entry fee
    SubscriptionFee,
    /// Redemption settlement: gross proceeds of the units sold
    RedemptionNet,
    /// Redemption settlement: exit fee
    RedemptionFee,
    /// Residual of a subscription restituted to the investor
    Refund,
    /// Coupon received on a mandate or instrument
    Coupon,
    /// Capital repaid at an instrument's maturity
    CapitalReturn,
}

impl CashEntryKind {
    /// The direction this kind moves cash
    pub fn direction(&self) -> EntryDirection {
        match self {
            CashEntryKind::Deposit
            | CashEntryKind::RedemptionNet
            | CashEntryKind::Coupon
            | CashEntryKind::CapitalReturn => EntryDirection::Credit,
            CashEntryKind::Withdraw
            | CashEntryKind::SubscriptionNet
            | CashEntryKind::SubscriptionFee
            | CashEntryKind::RedemptionFee
            | CashEntryKind::Refund => EntryDirection::Debit,
        }
    }
}

/// An immutable cash movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashEntry {
    /// Unique entry identifier
    pub id: CashEntryId,
    /// Account the movement belongs to
    pub account_id: CashAccountId,
    /// Movement kind; determines the sign
    pub kind: CashEntryKind,
    /// Amount, always positive
    pub amount: Money,
    /// Originating record (e.g., an order ID)
    pub reference: Option<Uuid>,
    /// When the entry was posted
    pub posted_at: DateTime<Utc>,
}

impl CashEntry {
    /// Creates a new cash entry
    pub fn new(account_id: CashAccountId, kind: CashEntryKind, amount: Money) -> Self {
        Self {
            id: CashEntryId::new_v7(),
            account_id,
            kind,
            amount,
            reference: None,
            posted_at: Utc::now(),
        }
    }

    /// Sets the originating record reference
    pub fn with_reference(mut self, reference: Uuid) -> Self {
        self.reference = Some(reference);
        self
    }

    /// The amount with its sign applied
    pub fn signed_amount(&self) -> Money {
        match self.kind.direction() {
            EntryDirection::Credit => self.amount,
            EntryDirection::Debit => -self.amount,
        }
    }
}

/// Typed unit movements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitEntryKind {
    /// Units created by a subscription
    Subscription,
    /// Units cancelled by a redemption
    Redemption,
}

impl UnitEntryKind {
    /// The direction this kind moves units
    pub fn direction(&self) -> EntryDirection {
        match self {
            UnitEntryKind::Subscription => EntryDirection::Credit,
            UnitEntryKind::Redemption => EntryDirection::Debit,
        }
    }
}

/// An immutable unit movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitEntry {
    /// Unique entry identifier
    pub id: UnitEntryId,
    /// Account the movement belongs to
    pub account_id: UnitAccountId,
    /// Movement kind; determines the sign
    pub kind: UnitEntryKind,
    /// Unit quantity, always positive
    pub units: Decimal,
    /// Originating record (e.g., an order ID)
    pub reference: Option<Uuid>,
    /// When the entry was posted
    pub posted_at: DateTime<Utc>,
}

impl UnitEntry {
    /// Creates a new unit entry
    pub fn new(account_id: UnitAccountId, kind: UnitEntryKind, units: Decimal) -> Self {
        Self {
            id: UnitEntryId::new_v7(),
            account_id,
            kind,
            units,
            reference: None,
            posted_at: Utc::now(),
        }
    }

    /// Sets the originating record reference
    pub fn with_reference(mut self, reference: Uuid) -> Self {
        self.reference = Some(reference);
        self
    }

    /// The unit quantity with its sign applied
    pub fn signed_units(&self) -> Decimal {
        match self.kind.direction() {
            EntryDirection::Credit => self.units,
            EntryDirection::Debit => -self.units,
        }
    }
}

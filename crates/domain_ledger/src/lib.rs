//! Ledger Domain - Append-Only Movement Store
//!
//! This crate is the single source of truth for cash balances and unit
//! holdings. It records immutable, timestamped, typed movements; balances
//! are always computed as the signed sum of an account's entries and are
//! never stored as a mutable counter.
//!
//! # Invariants
//!
//! - Entries are append-only: once posted they are never edited or deleted
//! - Every entry's amount/quantity is stored positive; the sign comes from
//!   its kind
//! - A settlement batch posts atomically: either every entry in the batch
//!   is appended or none is
//!
//! # Concurrency
//!
//! Posting requires `&mut Ledger`, so the sufficient-balance check and the
//! write it guards form one critical section under Rust's borrow rules.
//! Serializing settlements across processes is the persistence adapter's
//! concern, outside this crate.

pub mod entry;
pub mod ledger;
pub mod error;

pub use entry::{CashEntry, CashEntryKind, UnitEntry, UnitEntryKind, EntryDirection};
pub use ledger::{Ledger, SettlementBatch};
pub use error::LedgerError;

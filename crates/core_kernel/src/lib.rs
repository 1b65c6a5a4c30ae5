//! Core Kernel - Foundational types and utilities for the fund administration system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Common identifiers and value objects

pub mod money;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency, Rate, MoneyError};
pub use identifiers::{
    InvestorId, FundId, ShareClassId, CashAccountId, UnitAccountId,
    CashEntryId, UnitEntryId, OrderId, NavId, InstrumentId,
};
pub use error::CoreError;

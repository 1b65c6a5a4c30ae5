//! Net Asset Value (NAV) quotes
//!
//! NAV quotes move through draft -> computed -> validated; the order
//! engine only ever applies validated quotes. `NavQuoteProvider` is the
//! synchronous port the engine reads prices through.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::{Currency, FundId, NavId, ShareClassId};

use crate::error::FundError;

/// NAV quote lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavState {
    /// Entered but not computed
    Draft,
    /// Computed from positions, awaiting sign-off
    Computed,
    /// Signed off; may be applied to orders
    Validated,
}

/// A single NAV price point for a fund on a valuation date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavQuote {
    /// Unique identifier
    pub id: NavId,
    /// Fund this NAV is for
    pub fund_id: FundId,
    /// Share class, when the fund prices per class
    pub share_class: Option<ShareClassId>,
    /// Valuation date
    pub nav_date: NaiveDate,
    /// NAV value per unit
    pub value: Decimal,
    /// Currency
    pub currency: Currency,
    /// Lifecycle state
    pub state: NavState,
    /// Source of the quote (pricing feed, manual entry, ...)
    pub source: Option<String>,
    /// When this quote was recorded
    pub created_at: DateTime<Utc>,
}

impl NavQuote {
    /// Creates a new NAV quote in `Draft` state
    pub fn new(fund_id: FundId, nav_date: NaiveDate, value: Decimal, currency: Currency) -> Self {
        Self {
            id: NavId::new_v7(),
            fund_id,
            share_class: None,
            nav_date,
            value,
            currency,
            state: NavState::Draft,
            source: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the share class
    pub fn with_share_class(mut self, share_class: ShareClassId) -> Self {
        self.share_class = Some(share_class);
        self
    }

    /// Sets the quote source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Marks the quote computed
    pub fn mark_computed(&mut self) {
        if self.state == NavState::Draft {
            self.state = NavState::Computed;
        }
    }

    /// Signs the quote off for application to orders
    ///
    /// Rejects non-positive values; a zero or negative NAV can never be
    /// applied to a settlement.
    pub fn validate(&mut self) -> Result<(), FundError> {
        if self.value <= Decimal::ZERO {
            return Err(FundError::InvalidNavValue(self.value));
        }
        self.state = NavState::Validated;
        Ok(())
    }

    /// True if the quote may be applied to orders
    pub fn is_validated(&self) -> bool {
        self.state == NavState::Validated
    }
}

/// NAV history for one fund, ordered by valuation date
#[derive(Debug, Default)]
pub struct NavHistory {
    quotes: Vec<NavQuote>,
}

impl NavHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a quote, keeping the history sorted by date
    pub fn add(&mut self, quote: NavQuote) {
        self.quotes.push(quote);
        self.quotes.sort_by(|a, b| a.nav_date.cmp(&b.nav_date));
    }

    /// The most recent quote, validated or not
    pub fn latest(&self) -> Option<&NavQuote> {
        self.quotes.last()
    }

    /// The most recent validated quote
    pub fn latest_validated(&self) -> Option<&NavQuote> {
        self.quotes.iter().rev().find(|q| q.is_validated())
    }

    /// The validated quote for an exact valuation date
    pub fn validated_as_of(&self, date: NaiveDate) -> Option<&NavQuote> {
        self.quotes
            .iter()
            .find(|q| q.nav_date == date && q.is_validated())
    }

    /// Return between two valuation dates, using validated quotes
    pub fn calculate_return(&self, from: NaiveDate, to: NaiveDate) -> Option<Decimal> {
        let start = self.validated_as_of(from)?;
        let end = self.validated_as_of(to)?;

        if start.value.is_zero() {
            return None;
        }

        Some((end.value - start.value) / start.value)
    }
}

/// Synchronous price-lookup port consumed by the order engine
pub trait NavQuoteProvider {
    /// The currently applicable validated NAV for a fund
    fn current_nav(&self, fund_id: &FundId) -> Option<&NavQuote>;

    /// The validated NAV for a fund on a specific valuation date
    fn nav_as_of(&self, fund_id: &FundId, date: NaiveDate) -> Option<&NavQuote>;
}

/// In-process NAV board covering many funds
#[derive(Debug, Default)]
pub struct NavBoard {
    histories: HashMap<FundId, NavHistory>,
}

impl NavBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a quote for its fund
    pub fn publish(&mut self, quote: NavQuote) {
        self.histories.entry(quote.fund_id).or_default().add(quote);
    }

    /// Records and immediately validates a quote
    pub fn publish_validated(&mut self, mut quote: NavQuote) -> Result<(), FundError> {
        quote.validate()?;
        self.publish(quote);
        Ok(())
    }

    /// History for one fund
    pub fn history(&self, fund_id: &FundId) -> Option<&NavHistory> {
        self.histories.get(fund_id)
    }
}

impl NavQuoteProvider for NavBoard {
    fn current_nav(&self, fund_id: &FundId) -> Option<&NavQuote> {
        self.histories.get(fund_id)?.latest_validated()
    }

    fn nav_as_of(&self, fund_id: &FundId, date: NaiveDate) -> Option<&NavQuote> {
        self.histories.get(fund_id)?.validated_as_of(date)
    }
}

//! Corporate-action events on instruments
//!
//! Splits, coupon payments, dividends and the like, with the ratio and
//! date guards applied before an event can touch any position. Position
//! application is a pure computation here; the position store itself
//! lives with the caller.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{InstrumentId, Money, Rate};

use crate::error::BondError;

/// Kinds of instrument events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentEventKind {
    CouponPayment,
    Dividend,
    StockSplit,
    ReverseSplit,
    CapitalIncrease,
    CapitalReduction,
    Maturity,
    Default,
    Other,
}

/// Event lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventState {
    Draft,
    Confirmed,
    Processed,
    Cancelled,
}

/// A corporate action announced on an instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentEvent {
    /// Unique identifier
    pub id: Uuid,
    /// Instrument the event applies to
    pub instrument_id: InstrumentId,
    /// Event kind
    pub kind: InstrumentEventKind,
    /// Effective date of the event
    pub event_date: NaiveDate,
    /// Entitlement cut-off date
    pub record_date: Option<NaiveDate>,
    /// Cash payment date
    pub payment_date: Option<NaiveDate>,
    /// Position multiplier (e.g., 0.5 for a 1-for-2 reverse split)
    pub adjustment_ratio: Decimal,
    /// Conversion ratio into a successor instrument
    pub quantity_ratio: Decimal,
    /// Cash distributed per event, if any
    pub cash_amount: Option<Money>,
    /// Withholding tax rate applied to the cash amount
    pub tax_rate: Rate,
    /// Lifecycle state
    pub state: EventState,
    /// Date the event was processed
    pub processed_on: Option<NaiveDate>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl InstrumentEvent {
    /// Creates a draft event with neutral ratios
    pub fn new(instrument_id: InstrumentId, kind: InstrumentEventKind, event_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            instrument_id,
            kind,
            event_date,
            record_date: None,
            payment_date: None,
            adjustment_ratio: dec!(1),
            quantity_ratio: dec!(1),
            cash_amount: None,
            tax_rate: Rate::zero(),
            state: EventState::Draft,
            processed_on: None,
            created_at: Utc::now(),
        }
    }

    /// Sets position ratios
    ///
    /// The adjustment ratio must be strictly positive; the quantity ratio
    /// may be zero (a worthless conversion) but never negative.
    pub fn with_ratios(mut self, adjustment: Decimal, quantity: Decimal) -> Result<Self, BondError> {
        if adjustment <= Decimal::ZERO {
            return Err(BondError::NonPositiveAdjustmentRatio(adjustment));
        }
        if quantity < Decimal::ZERO {
            return Err(BondError::NegativeQuantityRatio(quantity));
        }
        self.adjustment_ratio = adjustment;
        self.quantity_ratio = quantity;
        Ok(self)
    }

    /// Sets the cash distribution and its withholding tax
    pub fn with_cash(mut self, amount: Money, tax_rate: Rate) -> Self {
        self.cash_amount = Some(amount);
        self.tax_rate = tax_rate;
        self
    }

    /// Sets the entitlement and payment dates
    pub fn with_dates(mut self, record_date: NaiveDate, payment_date: NaiveDate) -> Self {
        self.record_date = Some(record_date);
        self.payment_date = Some(payment_date);
        self
    }

    /// Cash amount net of withholding tax
    pub fn net_amount(&self) -> Option<Money> {
        self.cash_amount
            .map(|gross| gross - self.tax_rate.apply(&gross))
    }

    /// Confirms the event, checking date consistency
    ///
    /// Record and payment dates, when set, may not precede the event date
    /// and must be in order themselves.
    pub fn confirm(&mut self) -> Result<(), BondError> {
        if self.state != EventState::Draft {
            return Err(self.transition_error(EventState::Confirmed));
        }
        if let Some(record) = self.record_date {
            if record < self.event_date {
                return Err(BondError::InconsistentEventDates(
                    "record date precedes event date".to_string(),
                ));
            }
        }
        if let (Some(record), Some(payment)) = (self.record_date, self.payment_date) {
            if payment < record {
                return Err(BondError::InconsistentEventDates(
                    "payment date precedes record date".to_string(),
                ));
            }
        }
        self.state = EventState::Confirmed;
        Ok(())
    }

    /// Marks the event processed
    pub fn process(&mut self, on: NaiveDate) -> Result<(), BondError> {
        if self.state != EventState::Confirmed {
            return Err(self.transition_error(EventState::Processed));
        }
        self.state = EventState::Processed;
        self.processed_on = Some(on);
        Ok(())
    }

    /// Cancels a not-yet-processed event
    pub fn cancel(&mut self) -> Result<(), BondError> {
        if self.state == EventState::Processed {
            return Err(self.transition_error(EventState::Cancelled));
        }
        self.state = EventState::Cancelled;
        Ok(())
    }

    /// The unit position after applying the adjustment ratio
    pub fn apply_to_units(&self, units: Decimal) -> Decimal {
        units * self.adjustment_ratio
    }

    fn transition_error(&self, target: EventState) -> BondError {
        BondError::InvalidEventTransition {
            from: format!("{:?}", self.state),
            to: format!("{target:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_ratio_guards() {
        let event = InstrumentEvent::new(InstrumentId::new_v7(), InstrumentEventKind::StockSplit, date(2025, 3, 1));

        assert!(matches!(
            event.clone().with_ratios(dec!(0), dec!(1)),
            Err(BondError::NonPositiveAdjustmentRatio(_))
        ));
        assert!(matches!(
            event.clone().with_ratios(dec!(2), dec!(-1)),
            Err(BondError::NegativeQuantityRatio(_))
        ));
        assert!(event.with_ratios(dec!(2), dec!(1)).is_ok());
    }

    #[test]
    fn test_split_doubles_position() {
        let event = InstrumentEvent::new(InstrumentId::new_v7(), InstrumentEventKind::StockSplit, date(2025, 3, 1))
            .with_ratios(dec!(2), dec!(1))
            .unwrap();

        assert_eq!(event.apply_to_units(dec!(150)), dec!(300));
    }

    #[test]
    fn test_net_amount_after_tax() {
        let event = InstrumentEvent::new(InstrumentId::new_v7(), InstrumentEventKind::Dividend, date(2025, 3, 1))
            .with_cash(Money::new(dec!(50000), Currency::XOF), Rate::from_percentage(dec!(10)));

        assert_eq!(event.net_amount().unwrap().amount(), dec!(45000));
    }

    #[test]
    fn test_lifecycle_and_date_consistency() {
        let mut event = InstrumentEvent::new(InstrumentId::new_v7(), InstrumentEventKind::CouponPayment, date(2025, 3, 1))
            .with_dates(date(2025, 2, 1), date(2025, 3, 5));

        // Record date before event date
        assert!(matches!(event.confirm(), Err(BondError::InconsistentEventDates(_))));

        event.record_date = Some(date(2025, 3, 1));
        event.confirm().unwrap();
        event.process(date(2025, 3, 5)).unwrap();

        assert_eq!(event.state, EventState::Processed);
        assert!(event.cancel().is_err());
    }

    #[test]
    fn test_draft_event_can_cancel() {
        let mut event = InstrumentEvent::new(InstrumentId::new_v7(), InstrumentEventKind::Other, date(2025, 3, 1));
        event.cancel().unwrap();
        assert_eq!(event.state, EventState::Cancelled);
        assert!(event.confirm().is_err());
    }
}

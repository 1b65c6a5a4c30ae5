//! Bond instrument terms
//!
//! The static contract of a bond: face value, coupon rate, payment
//! frequency and the issue/value/maturity date triple. All analytics in
//! this crate derive from these terms plus a market price.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{InstrumentId, Money};

use crate::error::BondError;

/// Coupon payment frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponFrequency {
    Annual,
    SemiAnnual,
    Quarterly,
    Monthly,
    /// Single coupon paid with the principal at maturity
    AtMaturity,
}

impl CouponFrequency {
    /// Coupon periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CouponFrequency::Annual | CouponFrequency::AtMaturity => 1,
            CouponFrequency::SemiAnnual => 2,
            CouponFrequency::Quarterly => 4,
            CouponFrequency::Monthly => 12,
        }
    }

    /// Months in one coupon period, when the frequency is periodic
    fn months_per_period(&self) -> Option<u32> {
        match self {
            CouponFrequency::Annual => Some(12),
            CouponFrequency::SemiAnnual => Some(6),
            CouponFrequency::Quarterly => Some(3),
            CouponFrequency::Monthly => Some(1),
            CouponFrequency::AtMaturity => None,
        }
    }
}

/// Static terms of a bond instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondTerms {
    /// Instrument identifier
    pub instrument_id: InstrumentId,
    /// Nominal repaid at maturity
    pub face_value: Money,
    /// Annual coupon rate in percent (e.g., 5.0 for 5%)
    pub coupon_rate: Decimal,
    /// Coupon payment frequency
    pub frequency: CouponFrequency,
    /// Date the bond was issued
    pub issue_date: NaiveDate,
    /// Date interest starts accruing
    pub value_date: NaiveDate,
    /// Date the principal is repaid
    pub maturity_date: NaiveDate,
}

impl BondTerms {
    /// Creates validated bond terms
    ///
    /// # Errors
    ///
    /// - value date before issue date
    /// - maturity not strictly after value date
    /// - coupon rate outside [0%, 50%]
    pub fn new(
        face_value: Money,
        coupon_rate: Decimal,
        frequency: CouponFrequency,
        issue_date: NaiveDate,
        value_date: NaiveDate,
        maturity_date: NaiveDate,
    ) -> Result<Self, BondError> {
        if value_date < issue_date {
            return Err(BondError::ValueBeforeIssue {
                issue: issue_date,
                value: value_date,
            });
        }
        if maturity_date <= value_date {
            return Err(BondError::MaturityNotAfterValue {
                value: value_date,
                maturity: maturity_date,
            });
        }
        if coupon_rate < Decimal::ZERO || coupon_rate > dec!(50) {
            return Err(BondError::CouponRateOutOfRange(coupon_rate));
        }

        Ok(Self {
            instrument_id: InstrumentId::new_v7(),
            face_value,
            coupon_rate,
            frequency,
            issue_date,
            value_date,
            maturity_date,
        })
    }

    /// The coupon date one period after `from`, capped at maturity
    pub fn next_period_date(&self, from: NaiveDate) -> NaiveDate {
        match self.frequency.months_per_period() {
            Some(months) => from
                .checked_add_months(Months::new(months))
                .unwrap_or(self.maturity_date),
            None => self.maturity_date,
        }
    }

    /// Accrued interest at `as_of`, Actual/360 convention
    ///
    /// Zero before the value date; interest accrues from the value date
    /// at `face x rate/100/360` per day.
    pub fn accrued_interest(&self, as_of: NaiveDate) -> Money {
        if as_of < self.value_date {
            return Money::zero(self.face_value.currency());
        }
        let days_accrued = Decimal::from((as_of - self.value_date).num_days());
        let daily_rate = self.coupon_rate / dec!(100) / dec!(360);
        self.face_value.multiply(daily_rate * days_accrued)
    }
}

//! Coupon and amortization schedule generation
//!
//! Dates advance one coupon period at a time from the value date; the
//! maturity date is always the final entry, whether or not the period
//! grid lands on it. Amortization follows the bullet convention: every
//! installment pays interest only, the last one also repays the full
//! principal.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::Money;

use crate::terms::BondTerms;

/// One scheduled coupon payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponEvent {
    /// Coupon number, starting at 1
    pub number: u32,
    /// Payment date
    pub payment_date: NaiveDate,
    /// Coupon amount for the period
    pub amount: Money,
}

/// One row of a bullet amortization table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationLine {
    /// Installment number, starting at 1
    pub installment: u32,
    /// Due date
    pub due_date: NaiveDate,
    /// Principal outstanding at the start of the period
    pub opening_principal: Money,
    /// Interest due for the period
    pub interest: Money,
    /// Principal repaid with this installment
    pub principal_repayment: Money,
    /// Principal outstanding after the installment
    pub closing_principal: Money,
}

impl AmortizationLine {
    /// Interest plus principal repayment
    pub fn total_payment(&self) -> Money {
        self.interest + self.principal_repayment
    }
}

/// All coupon dates from the value date to maturity
///
/// Advances period by period; if the next period reaches or passes
/// maturity, maturity itself closes the schedule.
pub fn coupon_dates(terms: &BondTerms) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = terms.value_date;

    while current < terms.maturity_date {
        let next = terms.next_period_date(current);
        if next >= terms.maturity_date {
            dates.push(terms.maturity_date);
            break;
        }
        dates.push(next);
        current = next;
    }

    if dates.last() != Some(&terms.maturity_date) {
        dates.push(terms.maturity_date);
    }

    dates
}

/// The coupon amount paid each period: `face x rate/100 / periods_per_year`
pub fn coupon_amount(terms: &BondTerms) -> Money {
    let periods = Decimal::from(terms.frequency.periods_per_year());
    terms
        .face_value
        .multiply(terms.coupon_rate / dec!(100) / periods)
}

/// The full coupon schedule for the bond
pub fn coupon_schedule(terms: &BondTerms) -> Vec<CouponEvent> {
    let amount = coupon_amount(terms);
    coupon_dates(terms)
        .into_iter()
        .enumerate()
        .map(|(i, payment_date)| CouponEvent {
            number: (i + 1) as u32,
            payment_date,
            amount,
        })
        .collect()
}

/// The first coupon date strictly after `as_of`, if any remain
pub fn next_coupon_date(terms: &BondTerms, as_of: NaiveDate) -> Option<NaiveDate> {
    coupon_dates(terms).into_iter().find(|d| *d > as_of)
}

/// Days from `as_of` to the next coupon, if any remain
pub fn days_to_next_coupon(terms: &BondTerms, as_of: NaiveDate) -> Option<i64> {
    next_coupon_date(terms, as_of).map(|d| (d - as_of).num_days())
}

/// Bullet amortization table: interest every period, principal repaid in
/// full with the final installment
pub fn amortization_schedule(terms: &BondTerms) -> Vec<AmortizationLine> {
    let dates = coupon_dates(terms);
    let last = dates.len();
    let zero = Money::zero(terms.face_value.currency());
    let interest = coupon_amount(terms);

    let mut opening = terms.face_value;
    let mut lines = Vec::with_capacity(last);

    for (i, due_date) in dates.into_iter().enumerate() {
        let installment = (i + 1) as u32;
        let principal_repayment = if installment as usize == last { opening } else { zero };
        let closing = opening - principal_repayment;

        lines.push(AmortizationLine {
            installment,
            due_date,
            opening_principal: opening,
            interest,
            principal_repayment,
            closing_principal: closing,
        });

        opening = closing;
    }

    lines
}

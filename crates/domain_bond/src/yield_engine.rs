//! Yield, duration and convexity analytics
//!
//! Solves `price = sum(CF_t / (1+y)^t)` for the yield to maturity with
//! Newton-Raphson, then derives Macaulay/modified duration and convexity
//! from the same discounted flows. Cash flows are normalized per 100 of
//! face value so the clean market price (in percent of face) is compared
//! on its own scale.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::Money;

use crate::error::BondError;
use crate::schedule::coupon_dates;
use crate::terms::BondTerms;

/// Convergence tolerance on the price residual
const TOLERANCE: f64 = 1e-6;

/// Iteration cap for the solver
const MAX_ITERATIONS: u32 = 100;

/// A discounted cash flow, normalized per 100 of face value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cashflow {
    /// Payment date
    pub due_date: NaiveDate,
    /// Time to payment in years (Actual/365)
    pub years: f64,
    /// Amount per 100 of face value
    pub amount: f64,
}

/// Solved yield measures for one bond and price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldReport {
    /// Yield to maturity, percent per annum
    pub ytm: f64,
    /// Coupon rate over clean price, percent
    pub current_yield: f64,
    /// Macaulay duration in years
    pub macaulay_duration: f64,
    /// Modified duration in years
    pub modified_duration: f64,
    /// Convexity
    pub convexity: f64,
    /// Accrued interest at the evaluation date
    pub accrued_interest: Money,
    /// Clean price plus accrued, percent of face
    pub dirty_price: Decimal,
    /// Newton-Raphson iterations used
    pub iterations: u32,
    /// True if the residual reached tolerance within the iteration cap
    pub converged: bool,
}

/// Remaining cash flows strictly after `as_of`, per 100 of face
///
/// Each coupon date pays the period coupon; the maturity date also
/// repays the principal.
pub fn cash_flows(terms: &BondTerms, as_of: NaiveDate) -> Vec<Cashflow> {
    let periods = f64::from(terms.frequency.periods_per_year());
    let coupon_per_period = terms.coupon_rate.to_f64().unwrap_or(0.0) / periods;

    coupon_dates(terms)
        .into_iter()
        .filter(|date| *date > as_of)
        .map(|date| {
            let years = (date - as_of).num_days() as f64 / 365.0;
            let amount = if date == terms.maturity_date {
                coupon_per_period + 100.0
            } else {
                coupon_per_period
            };
            Cashflow {
                due_date: date,
                years,
                amount,
            }
        })
        .collect()
}

/// Analyzes a bond against a clean market price (percent of face value)
///
/// Newton-Raphson starts from the coupon rate and iterates
/// `y <- y - f(y)/f'(y)` with the analytic derivative
/// `f'(y) = sum(-t * CF_t / (1+y)^(t+1))`; a numerically zero derivative
/// damps the guess by 0.99 instead of dividing by it. After
/// `MAX_ITERATIONS` the last iterate is reported with `converged: false`.
pub fn analyze(
    terms: &BondTerms,
    clean_price: Decimal,
    as_of: NaiveDate,
) -> Result<YieldReport, BondError> {
    if clean_price <= Decimal::ZERO {
        return Err(BondError::NonPositivePrice(clean_price));
    }

    let flows = cash_flows(terms, as_of);
    if flows.is_empty() {
        return Err(BondError::NoRemainingCashFlows(as_of));
    }

    let price = clean_price.to_f64().unwrap_or(0.0);
    let coupon_rate = terms.coupon_rate.to_f64().unwrap_or(0.0);

    let mut y = coupon_rate / 100.0;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < MAX_ITERATIONS {
        let residual = price_at(&flows, y) - price;
        if residual.abs() < TOLERANCE {
            converged = true;
            break;
        }

        let derivative: f64 = flows
            .iter()
            .map(|cf| -cf.years * cf.amount / (1.0 + y).powf(cf.years + 1.0))
            .sum();

        if derivative.abs() < 1e-12 {
            // Damp instead of dividing by a vanishing slope
            y *= 0.99;
        } else {
            y -= residual / derivative;
        }
        iterations += 1;
    }

    debug!(ytm = y * 100.0, iterations, converged, "yield solved");

    let solved_price = price_at(&flows, y);
    let macaulay_duration = flows
        .iter()
        .map(|cf| cf.years * cf.amount / (1.0 + y).powf(cf.years))
        .sum::<f64>()
        / solved_price;
    let modified_duration = macaulay_duration / (1.0 + y);
    let convexity = flows
        .iter()
        .map(|cf| cf.years * (cf.years + 1.0) * cf.amount / (1.0 + y).powf(cf.years + 2.0))
        .sum::<f64>()
        / solved_price;

    let accrued_interest = terms.accrued_interest(as_of);
    let face = terms.face_value.amount();
    let dirty_price = clean_price + (accrued_interest.amount() / face * dec!(100)).round_dp(6);

    Ok(YieldReport {
        ytm: y * 100.0,
        current_yield: coupon_rate / price.max(f64::MIN_POSITIVE) * 100.0,
        macaulay_duration,
        modified_duration,
        convexity,
        accrued_interest,
        dirty_price,
        iterations,
        converged,
    })
}

fn price_at(flows: &[Cashflow], y: f64) -> f64 {
    flows
        .iter()
        .map(|cf| cf.amount / (1.0 + y).powf(cf.years))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::CouponFrequency;
    use core_kernel::Currency;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn five_pct_three_year() -> BondTerms {
        BondTerms::new(
            Money::new(dec!(1000000), Currency::XOF),
            dec!(5),
            CouponFrequency::Annual,
            date(2025, 1, 15),
            date(2025, 1, 15),
            date(2028, 1, 15),
        )
        .unwrap()
    }

    #[test]
    fn test_cash_flows_normalized_per_100() {
        let flows = cash_flows(&five_pct_three_year(), date(2025, 1, 15));

        assert_eq!(flows.len(), 3);
        assert_eq!(flows[0].amount, 5.0);
        assert_eq!(flows[1].amount, 5.0);
        assert_eq!(flows[2].amount, 105.0);
    }

    #[test]
    fn test_past_flows_are_skipped() {
        let flows = cash_flows(&five_pct_three_year(), date(2026, 6, 1));
        assert_eq!(flows.len(), 2);
        assert_eq!(flows[0].due_date, date(2027, 1, 15));
    }

    #[test]
    fn test_par_bond_ytm_equals_coupon() {
        let report = analyze(&five_pct_three_year(), dec!(100), date(2025, 1, 15)).unwrap();

        assert!((report.ytm - 5.0).abs() < 1e-4);
        assert!(report.converged);
    }

    #[test]
    fn test_discount_bond_yields_above_coupon() {
        let report = analyze(&five_pct_three_year(), dec!(95), date(2025, 1, 15)).unwrap();
        assert!(report.ytm > 5.0);
        assert!(report.converged);
    }

    #[test]
    fn test_premium_bond_yields_below_coupon() {
        let report = analyze(&five_pct_three_year(), dec!(105), date(2025, 1, 15)).unwrap();
        assert!(report.ytm < 5.0);
    }

    #[test]
    fn test_duration_and_convexity_of_par_bond() {
        let report = analyze(&five_pct_three_year(), dec!(100), date(2025, 1, 15)).unwrap();

        // Macaulay duration of a 3y 5% annual par bond is about 2.86 years
        assert!((report.macaulay_duration - 2.859).abs() < 0.01);
        assert!(report.modified_duration < report.macaulay_duration);
        assert!(report.convexity > 0.0);
    }

    #[test]
    fn test_current_yield() {
        let report = analyze(&five_pct_three_year(), dec!(95), date(2025, 1, 15)).unwrap();
        assert!((report.current_yield - 5.0 / 95.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_dirty_price_includes_accrued() {
        // 36 days accrued at 5% Act/360 -> 0.5 per 100 of face
        let report = analyze(&five_pct_three_year(), dec!(100), date(2025, 2, 20)).unwrap();
        assert_eq!(report.dirty_price, dec!(100.5));
        assert_eq!(report.accrued_interest.amount(), dec!(5000));
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let result = analyze(&five_pct_three_year(), dec!(0), date(2025, 1, 15));
        assert!(matches!(result, Err(BondError::NonPositivePrice(_))));
    }

    #[test]
    fn test_matured_bond_has_no_flows() {
        let result = analyze(&five_pct_three_year(), dec!(100), date(2028, 1, 15));
        assert!(matches!(result, Err(BondError::NoRemainingCashFlows(_))));
    }

    #[test]
    fn test_zero_coupon_bond_solves_from_zero_guess() {
        let terms = BondTerms::new(
            Money::new(dec!(1000000), Currency::XOF),
            dec!(0),
            CouponFrequency::Annual,
            date(2025, 1, 15),
            date(2025, 1, 15),
            date(2028, 1, 15),
        )
        .unwrap();

        // Priced at 86.38 over ~3 years -> roughly 5% yield
        let report = analyze(&terms, dec!(86.38), date(2025, 1, 15)).unwrap();
        assert!(report.converged);
        assert!((report.ytm - 5.0).abs() < 0.05);
    }
}

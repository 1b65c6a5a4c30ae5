//! Quantization & fee engine
//!
//! Pure functions, no side effects. The same code quotes a live preview
//! at submit time and the final figures at settlement; lifecycle code
//! decides when to call it.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::{Money, MoneyError, Rate};
use domain_fund::UNIT_PRECISION;

/// Errors raised by quantization, always before any state mutation
#[derive(Debug, Error)]
pub enum QuantizeError {
    #[error("NAV must be positive, got {0}")]
    InvalidNav(Decimal),

    #[error("Requested amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("Requested units must be positive, got {0}")]
    NonPositiveUnits(Decimal),

    #[error("Amount {amount} is too small to subscribe a single unit at {unit_price}")]
    InsufficientAmount { amount: Decimal, unit_price: Decimal },

    #[error("Fund only accepts whole units, requested {0}")]
    NonIntegerUnits(Decimal),

    #[error(transparent)]
    Calculation(#[from] MoneyError),
}

/// Result of quantizing a subscription amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionQuote {
    /// Units bought
    pub units: Decimal,
    /// Gross unit price including the entry fee
    pub unit_price_with_fee: Money,
    /// Cash invested: units x NAV
    pub cash_used: Money,
    /// Entry fee: units x NAV x rate
    pub fee: Money,
    /// Residual of the requested amount, restituted to the investor
    pub refund: Money,
}

/// Result of quantizing a redemption unit count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionQuote {
    /// Units sold
    pub units: Decimal,
    /// Gross proceeds: units x NAV
    pub gross_amount: Money,
    /// Exit fee: gross x rate
    pub fee: Money,
    /// Amount paid to the investor: gross - fee
    pub net_payout: Money,
}

/// Quantizes a subscription
///
/// The unit price used to size the order includes the entry fee:
/// `P = V x (1 + r/100)`. With fractional units the quantity is the
/// requested amount divided by P at 4 decimal places; otherwise it is
/// floored to a whole number of units.
///
/// Guarantees `cash_used + fee + refund == amount` and
/// `0 <= refund < unit_price_with_fee`.
pub fn quote_subscription(
    amount: Money,
    nav: Decimal,
    fee_rate: Rate,
    allow_fractional_units: bool,
) -> Result<SubscriptionQuote, QuantizeError> {
    if nav <= Decimal::ZERO {
        return Err(QuantizeError::InvalidNav(nav));
    }
    if !amount.is_positive() {
        return Err(QuantizeError::NonPositiveAmount(amount.amount()));
    }

    let gross_unit_price = nav * (dec!(1) + fee_rate.as_decimal());
    let theoretical_units = amount.amount() / gross_unit_price;

    let units = if allow_fractional_units {
        // Truncated, not rounded: rounding half-up could overdraw the
        // requested amount by a fraction of a unit.
        theoretical_units.round_dp_with_strategy(UNIT_PRECISION, RoundingStrategy::ToZero)
    } else {
        theoretical_units.floor()
    };

    if units <= Decimal::ZERO {
        return Err(QuantizeError::InsufficientAmount {
            amount: amount.amount(),
            unit_price: gross_unit_price,
        });
    }

    let currency = amount.currency();
    // Also truncated, so cash_used + fee can never exceed the requested amount
    let cash_used = Money::new(
        (units * nav).round_dp_with_strategy(UNIT_PRECISION, RoundingStrategy::ToZero),
        currency,
    );
    let fee = Money::new(
        (units * nav * fee_rate.as_decimal())
            .round_dp_with_strategy(UNIT_PRECISION, RoundingStrategy::ToZero),
        currency,
    );
    let refund = amount.checked_sub(&cash_used)?.checked_sub(&fee)?;

    Ok(SubscriptionQuote {
        units,
        unit_price_with_fee: Money::new(gross_unit_price, currency),
        cash_used,
        fee,
        refund,
    })
}

/// Quantizes a redemption
///
/// `gross = U x V`, `fee = gross x r/100`, `net_payout = gross - fee`.
/// Funds that disallow fractional units reject fractional requests.
pub fn quote_redemption(
    units: Decimal,
    nav: Decimal,
    fee_rate: Rate,
    allow_fractional_units: bool,
    currency: core_kernel::Currency,
) -> Result<RedemptionQuote, QuantizeError> {
    if nav <= Decimal::ZERO {
        return Err(QuantizeError::InvalidNav(nav));
    }
    if units <= Decimal::ZERO {
        return Err(QuantizeError::NonPositiveUnits(units));
    }
    if !allow_fractional_units && !units.fract().is_zero() {
        return Err(QuantizeError::NonIntegerUnits(units));
    }

    let gross_amount = Money::new(units * nav, currency);
    let fee = fee_rate.apply(&gross_amount);
    let net_payout = gross_amount.checked_sub(&fee)?;

    Ok(RedemptionQuote {
        units,
        gross_amount,
        fee,
        net_payout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;

    fn xof(amount: Decimal) -> Money {
        Money::new(amount, Currency::XOF)
    }

    #[test]
    fn test_subscription_integer_units() {
        // 1,000,000 at NAV 10,000 with 1% fee, whole units only:
        // unit price w/ fee 10,100 -> 99 units, 990,000 used, 9,900 fee, 100 back
        let quote = quote_subscription(
            xof(dec!(1000000)),
            dec!(10000),
            Rate::from_percentage(dec!(1)),
            false,
        )
        .unwrap();

        assert_eq!(quote.units, dec!(99));
        assert_eq!(quote.unit_price_with_fee.amount(), dec!(10100));
        assert_eq!(quote.cash_used.amount(), dec!(990000));
        assert_eq!(quote.fee.amount(), dec!(9900));
        assert_eq!(quote.refund.amount(), dec!(100));
    }

    #[test]
    fn test_subscription_fractional_units() {
        let quote = quote_subscription(
            xof(dec!(1000)),
            dec!(15.45),
            Rate::zero(),
            true,
        )
        .unwrap();

        assert_eq!(quote.units, dec!(64.7249));
        assert!(quote.refund.amount() >= Decimal::ZERO);
        assert!(quote.refund.amount() < dec!(15.45));
    }

    #[test]
    fn test_subscription_conservation() {
        let amount = xof(dec!(1000000));
        let quote = quote_subscription(amount, dec!(10000), Rate::from_percentage(dec!(1)), false).unwrap();

        let total = quote.cash_used + quote.fee + quote.refund;
        assert_eq!(total, amount);
    }

    #[test]
    fn test_subscription_amount_below_one_unit() {
        let result = quote_subscription(xof(dec!(5000)), dec!(10000), Rate::zero(), false);
        assert!(matches!(result, Err(QuantizeError::InsufficientAmount { .. })));
    }

    #[test]
    fn test_subscription_invalid_nav() {
        let result = quote_subscription(xof(dec!(1000)), dec!(0), Rate::zero(), true);
        assert!(matches!(result, Err(QuantizeError::InvalidNav(_))));
    }

    #[test]
    fn test_subscription_non_positive_amount() {
        let result = quote_subscription(xof(dec!(-1)), dec!(10000), Rate::zero(), true);
        assert!(matches!(result, Err(QuantizeError::NonPositiveAmount(_))));
    }

    #[test]
    fn test_redemption_with_fee() {
        // 50 units at NAV 10,000 with 2% exit fee
        let quote = quote_redemption(
            dec!(50),
            dec!(10000),
            Rate::from_percentage(dec!(2)),
            false,
            Currency::XOF,
        )
        .unwrap();

        assert_eq!(quote.gross_amount.amount(), dec!(500000));
        assert_eq!(quote.fee.amount(), dec!(10000));
        assert_eq!(quote.net_payout.amount(), dec!(490000));
    }

    #[test]
    fn test_redemption_rejects_fractional_units_when_disallowed() {
        let result = quote_redemption(dec!(10.5), dec!(10000), Rate::zero(), false, Currency::XOF);
        assert!(matches!(result, Err(QuantizeError::NonIntegerUnits(_))));
    }

    #[test]
    fn test_redemption_allows_fractional_units_when_allowed() {
        let quote = quote_redemption(dec!(10.5), dec!(100), Rate::zero(), true, Currency::XOF).unwrap();
        assert_eq!(quote.gross_amount.amount(), dec!(1050));
    }

    #[test]
    fn test_redemption_non_positive_units() {
        let result = quote_redemption(dec!(0), dec!(10000), Rate::zero(), true, Currency::XOF);
        assert!(matches!(result, Err(QuantizeError::NonPositiveUnits(_))));
    }
}

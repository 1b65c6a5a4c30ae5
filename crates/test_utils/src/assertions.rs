//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types that give more
//! meaningful error messages than standard assertions.

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_ledger::Ledger;
use domain_order::SubscriptionQuote;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more
/// than `tolerance`.
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is positive
pub fn assert_money_positive(money: &Money) {
    assert!(
        money.is_positive(),
        "Expected positive money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts the subscription conservation invariant:
/// `cash_used + fee + refund == requested` and `0 <= refund < P`
pub fn assert_subscription_conserved(quote: &SubscriptionQuote, requested: &Money) {
    let total = quote.cash_used + quote.fee + quote.refund;
    assert_eq!(
        total, *requested,
        "cash_used + fee + refund must reconstruct the requested amount"
    );
    assert!(
        quote.refund.amount() >= Decimal::ZERO,
        "refund must not be negative, got {}",
        quote.refund.amount()
    );
    assert!(
        quote.refund.amount() < quote.unit_price_with_fee.amount(),
        "refund {} must stay below one gross unit price {}",
        quote.refund.amount(),
        quote.unit_price_with_fee.amount()
    );
}

/// Asserts that an account's cash balance equals the signed sum of its
/// statement, entry by entry
pub fn assert_balance_is_derived(ledger: &Ledger, account_id: &core_kernel::CashAccountId) {
    let statement_sum = ledger
        .cash_statement(account_id)
        .iter()
        .fold(Money::zero(ledger.currency()), |acc, e| acc + e.signed_amount());

    assert_eq!(
        ledger.cash_balance(account_id),
        statement_sum,
        "balance must equal the signed sum of the account's entries"
    );
}

//! Order aggregate
//!
//! Subscriptions and redemptions are two variants of one shape driven by
//! one state machine:
//!
//! ```text
//! draft -> submitted -> validated -> accounted
//!   \---------\------------/
//!              cancelled
//! ```
//!
//! `accounted` is terminal and the only transition with a ledger effect.
//! Every guard failure is a typed error that leaves the order, and the
//! ledger, exactly as they were.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use core_kernel::{CashAccountId, FundId, InvestorId, Money, OrderId, UnitAccountId};
use domain_fund::{CashAccount, Fund, NavQuote, UnitAccount};
use domain_ledger::{CashEntry, CashEntryKind, Ledger, SettlementBatch, UnitEntry, UnitEntryKind};

use crate::confirmation::{PendingConfirmation, ValidationOutcome};
use crate::error::OrderError;
use crate::ports::ComplianceGate;
use crate::quantize::{quote_redemption, quote_subscription, RedemptionQuote, SubscriptionQuote};

/// Order lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderState {
    /// Captured but not yet submitted
    Draft,
    /// Submitted with a provisional quote
    Submitted,
    /// NAV confirmed; ready to settle
    Validated,
    /// Settled; ledger entries posted; terminal
    Accounted,
    /// Abandoned before settlement; terminal
    Cancelled,
}

/// Requested quantity of a redemption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedemptionQuantity {
    /// Redeem a specific number of units
    Units(Decimal),
    /// Redeem the account's whole holding, resolved at submit time
    All,
}

/// What the investor asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderRequest {
    /// Invest a cash amount
    Subscription { amount: Money },
    /// Sell a unit count (or everything)
    Redemption { quantity: RedemptionQuantity },
}

/// Quantities computed for the order, by variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderQuote {
    Subscription(SubscriptionQuote),
    Redemption(RedemptionQuote),
}

/// A subscription or redemption order against one (investor, fund) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier
    pub id: OrderId,
    /// Human reference ("SUB-..." / "RED-...")
    pub reference: String,
    /// Ordering investor
    pub investor_id: InvestorId,
    /// Fund being traded
    pub fund_id: FundId,
    /// Cash account debited/credited at settlement
    pub cash_account_id: CashAccountId,
    /// Unit account credited/debited at settlement
    pub unit_account_id: UnitAccountId,
    /// Requested quantity
    pub request: OrderRequest,
    /// Lifecycle state
    pub state: OrderState,
    /// Valuation date the order settles at
    pub nav_as_of: Option<NaiveDate>,
    /// NAV captured at submit (re-captured on acknowledged drift)
    pub captured_nav: Option<Decimal>,
    /// Redemption unit count after resolving `All`
    resolved_units: Option<Decimal>,
    /// Latest computed quote
    pub quote: Option<OrderQuote>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Submitted timestamp
    pub submitted_at: Option<DateTime<Utc>>,
    /// Validated timestamp
    pub validated_at: Option<DateTime<Utc>>,
    /// Settled timestamp
    pub settled_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates a draft subscription order
    ///
    /// The accounts must belong to the ordering investor and the fund,
    /// and the amount must be positive and in the fund currency.
    pub fn subscription(
        fund: &Fund,
        cash_account: &CashAccount,
        unit_account: &UnitAccount,
        amount: Money,
    ) -> Result<Self, OrderError> {
        check_account_pair(fund, cash_account, unit_account)?;
        if amount.currency() != fund.currency {
            return Err(OrderError::CurrencyMismatch {
                fund: fund.currency.to_string(),
                order: amount.currency().to_string(),
            });
        }
        if !amount.is_positive() {
            return Err(crate::quantize::QuantizeError::NonPositiveAmount(amount.amount()).into());
        }

        Ok(Self::new(
            generate_reference("SUB"),
            cash_account.investor_id,
            fund.id,
            cash_account.id,
            unit_account.id,
            OrderRequest::Subscription { amount },
        ))
    }

    /// Creates a draft redemption order
    pub fn redemption(
        fund: &Fund,
        cash_account: &CashAccount,
        unit_account: &UnitAccount,
        quantity: RedemptionQuantity,
    ) -> Result<Self, OrderError> {
        check_account_pair(fund, cash_account, unit_account)?;
        if let RedemptionQuantity::Units(units) = quantity {
            if units <= Decimal::ZERO {
                return Err(crate::quantize::QuantizeError::NonPositiveUnits(units).into());
            }
        }

        Ok(Self::new(
            generate_reference("RED"),
            unit_account.investor_id,
            fund.id,
            cash_account.id,
            unit_account.id,
            OrderRequest::Redemption { quantity },
        ))
    }

    fn new(
        reference: String,
        investor_id: InvestorId,
        fund_id: FundId,
        cash_account_id: CashAccountId,
        unit_account_id: UnitAccountId,
        request: OrderRequest,
    ) -> Self {
        Self {
            id: OrderId::new_v7(),
            reference,
            investor_id,
            fund_id,
            cash_account_id,
            unit_account_id,
            request,
            state: OrderState::Draft,
            nav_as_of: None,
            captured_nav: None,
            resolved_units: None,
            quote: None,
            created_at: Utc::now(),
            submitted_at: None,
            validated_at: None,
            settled_at: None,
        }
    }

    /// True once the order has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, OrderState::Accounted | OrderState::Cancelled)
    }

    /// Submits the order: captures the NAV-as-of date and a provisional
    /// quote at the current validated NAV
    ///
    /// Redemptions settle at `today + fund delay` and resolve `All` to the
    /// ledger-derived holding. No ledger effect.
    pub fn submit(
        &mut self,
        fund: &Fund,
        current: &NavQuote,
        ledger: &Ledger,
        today: NaiveDate,
    ) -> Result<(), OrderError> {
        self.ensure_state(OrderState::Draft, OrderState::Submitted)?;
        if !fund.is_open_for_orders() {
            return Err(OrderError::FundNotOpen(fund.code.clone()));
        }
        let nav = applicable_nav(self.fund_id, current)?;

        match self.request.clone() {
            OrderRequest::Subscription { amount } => {
                let quote = quote_subscription(
                    amount,
                    nav,
                    fund.fees.subscription_fee,
                    fund.fees.allow_fractional_units,
                )?;
                self.nav_as_of = Some(today);
                self.quote = Some(OrderQuote::Subscription(quote));
            }
            OrderRequest::Redemption { quantity } => {
                let available = ledger.unit_balance(&self.unit_account_id);
                let units = match quantity {
                    RedemptionQuantity::Units(units) => units,
                    RedemptionQuantity::All => available,
                };
                if units > available {
                    return Err(OrderError::InsufficientUnits {
                        available,
                        requested: units,
                    });
                }
                let quote = quote_redemption(
                    units,
                    nav,
                    fund.fees.redemption_fee,
                    fund.fees.allow_fractional_units,
                    fund.currency,
                )?;
                self.nav_as_of = Some(fund.redemption_delay.value_date(today));
                self.resolved_units = Some(units);
                self.quote = Some(OrderQuote::Redemption(quote));
            }
        }

        self.captured_nav = Some(nav);
        self.state = OrderState::Submitted;
        self.submitted_at = Some(Utc::now());
        debug!(order = %self.reference, nav = %nav, "order submitted");
        Ok(())
    }

    /// Validates the order against the currently validated NAV
    ///
    /// If the NAV still equals the one captured at submit, the order moves
    /// to `Validated`. If it drifted, the order stays `Submitted` and the
    /// caller receives a [`PendingConfirmation`] to put in front of an
    /// operator; validation completes only through [`Order::acknowledge`].
    pub fn validate(&mut self, current: &NavQuote) -> Result<ValidationOutcome, OrderError> {
        self.ensure_state(OrderState::Submitted, OrderState::Validated)?;
        let nav = applicable_nav(self.fund_id, current)?;
        let captured = self.captured_nav.ok_or_else(|| self.transition_error(OrderState::Validated))?;

        if nav != captured {
            return Ok(ValidationOutcome::ConfirmationRequired(
                PendingConfirmation::RevalidateAtNewNav {
                    order_id: self.id,
                    previous_nav: captured,
                    new_nav: nav,
                },
            ));
        }

        self.state = OrderState::Validated;
        self.validated_at = Some(Utc::now());
        Ok(ValidationOutcome::Validated)
    }

    /// Applies an operator-acknowledged NAV drift and completes validation
    ///
    /// Re-runs quantization at the acknowledged NAV. The currently
    /// validated NAV must still equal the one the operator saw; a further
    /// drift surfaces as [`OrderError::StaleNav`] and requires another
    /// validate round.
    pub fn acknowledge(
        &mut self,
        confirmation: &PendingConfirmation,
        fund: &Fund,
        current: &NavQuote,
    ) -> Result<(), OrderError> {
        self.ensure_state(OrderState::Submitted, OrderState::Validated)?;

        let PendingConfirmation::RevalidateAtNewNav { order_id, new_nav, .. } = confirmation;
        if *order_id != self.id {
            return Err(OrderError::ConfirmationMismatch {
                order: self.reference.clone(),
            });
        }

        let nav = applicable_nav(self.fund_id, current)?;
        if nav != *new_nav {
            return Err(OrderError::StaleNav {
                captured: *new_nav,
                current: nav,
            });
        }

        self.quote = Some(self.requote(fund, nav)?);
        self.captured_nav = Some(nav);
        self.state = OrderState::Validated;
        self.validated_at = Some(Utc::now());
        info!(order = %self.reference, nav = %nav, "NAV drift acknowledged, order validated");
        Ok(())
    }

    /// Settles the order: checks balances and eligibility, then posts the
    /// ledger entries as one atomic batch and moves to `Accounted`
    ///
    /// Calling this twice yields [`OrderError::AlreadySettled`] the second
    /// time; exactly one set of entries is ever persisted per order.
    pub fn settle(
        &mut self,
        fund: &Fund,
        current: &NavQuote,
        ledger: &mut Ledger,
        gate: &dyn ComplianceGate,
    ) -> Result<(), OrderError> {
        if self.state == OrderState::Accounted {
            return Err(OrderError::AlreadySettled(self.reference.clone()));
        }
        self.ensure_state(OrderState::Validated, OrderState::Accounted)?;

        let nav = applicable_nav(self.fund_id, current)?;
        let captured = self.captured_nav.ok_or_else(|| self.transition_error(OrderState::Accounted))?;
        if nav != captured {
            return Err(OrderError::StaleNav {
                captured,
                current: nav,
            });
        }

        if !gate.is_investor_eligible(&self.investor_id, &self.fund_id) {
            return Err(OrderError::InvestorNotEligible {
                investor: self.investor_id.to_string(),
                fund: self.fund_id.to_string(),
            });
        }

        // Final quantization at the confirmed NAV
        let quote = self.requote(fund, nav)?;
        let order_ref = *self.id.as_uuid();

        let batch = match &quote {
            OrderQuote::Subscription(q) => {
                let OrderRequest::Subscription { amount } = &self.request else {
                    return Err(self.transition_error(OrderState::Accounted));
                };
                let balance = ledger.cash_balance(&self.cash_account_id);
                if balance.amount() < amount.amount() {
                    return Err(OrderError::InsufficientFunds {
                        available: balance.amount(),
                        required: amount.amount(),
                    });
                }

                let mut batch = SettlementBatch::new()
                    .units(
                        UnitEntry::new(self.unit_account_id, UnitEntryKind::Subscription, q.units)
                            .with_reference(order_ref),
                    )
                    .cash(
                        CashEntry::new(self.cash_account_id, CashEntryKind::SubscriptionNet, q.cash_used)
                            .with_reference(order_ref),
                    );
                if q.fee.is_positive() {
                    batch = batch.cash(
                        CashEntry::new(self.cash_account_id, CashEntryKind::SubscriptionFee, q.fee)
                            .with_reference(order_ref),
                    );
                }
                if q.refund.is_positive() {
                    batch = batch.cash(
                        CashEntry::new(self.cash_account_id, CashEntryKind::Refund, q.refund)
                            .with_reference(order_ref),
                    );
                }
                batch
            }
            OrderQuote::Redemption(q) => {
                let available = ledger.unit_balance(&self.unit_account_id);
                if available < q.units {
                    return Err(OrderError::InsufficientUnits {
                        available,
                        requested: q.units,
                    });
                }

                let mut batch = SettlementBatch::new()
                    .units(
                        UnitEntry::new(self.unit_account_id, UnitEntryKind::Redemption, q.units)
                            .with_reference(order_ref),
                    )
                    .cash(
                        CashEntry::new(self.cash_account_id, CashEntryKind::RedemptionNet, q.gross_amount)
                            .with_reference(order_ref),
                    );
                if q.fee.is_positive() {
                    batch = batch.cash(
                        CashEntry::new(self.cash_account_id, CashEntryKind::RedemptionFee, q.fee)
                            .with_reference(order_ref),
                    );
                }
                batch
            }
        };

        ledger.post_settlement(batch)?;

        info!(
            order = %self.reference,
            fund = %fund.code,
            nav = %nav,
            "order settled"
        );

        self.quote = Some(quote);
        self.state = OrderState::Accounted;
        self.settled_at = Some(Utc::now());
        Ok(())
    }

    /// Cancels the order; pure state change, no ledger effect
    ///
    /// Settled orders can never be cancelled because their ledger entries
    /// are immutable.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        match self.state {
            OrderState::Accounted => Err(OrderError::AlreadySettled(self.reference.clone())),
            OrderState::Cancelled => Err(self.transition_error(OrderState::Cancelled)),
            _ => {
                self.state = OrderState::Cancelled;
                Ok(())
            }
        }
    }

    /// Re-runs quantization for this order at the given NAV
    fn requote(&self, fund: &Fund, nav: Decimal) -> Result<OrderQuote, OrderError> {
        match &self.request {
            OrderRequest::Subscription { amount } => Ok(OrderQuote::Subscription(quote_subscription(
                *amount,
                nav,
                fund.fees.subscription_fee,
                fund.fees.allow_fractional_units,
            )?)),
            OrderRequest::Redemption { .. } => {
                let units = self
                    .resolved_units
                    .ok_or_else(|| self.transition_error(OrderState::Validated))?;
                Ok(OrderQuote::Redemption(quote_redemption(
                    units,
                    nav,
                    fund.fees.redemption_fee,
                    fund.fees.allow_fractional_units,
                    fund.currency,
                )?))
            }
        }
    }

    fn ensure_state(&self, expected: OrderState, target: OrderState) -> Result<(), OrderError> {
        if self.state != expected {
            return Err(self.transition_error(target));
        }
        Ok(())
    }

    fn transition_error(&self, target: OrderState) -> OrderError {
        OrderError::InvalidTransition {
            from: format!("{:?}", self.state),
            to: format!("{target:?}"),
        }
    }
}

fn check_account_pair(
    fund: &Fund,
    cash_account: &CashAccount,
    unit_account: &UnitAccount,
) -> Result<(), OrderError> {
    if cash_account.fund_id != fund.id {
        return Err(OrderError::AccountFundMismatch {
            account: cash_account.account_number.clone(),
            fund: fund.code.clone(),
        });
    }
    if unit_account.fund_id != fund.id {
        return Err(OrderError::AccountFundMismatch {
            account: unit_account.account_number.clone(),
            fund: fund.code.clone(),
        });
    }
    if cash_account.investor_id != unit_account.investor_id {
        return Err(OrderError::AccountPairMismatch {
            cash_account: cash_account.account_number.clone(),
            unit_account: unit_account.account_number.clone(),
        });
    }
    if !cash_account.is_active() {
        return Err(OrderError::AccountNotActive(cash_account.account_number.clone()));
    }
    if !unit_account.is_active() {
        return Err(OrderError::AccountNotActive(unit_account.account_number.clone()));
    }
    Ok(())
}

fn applicable_nav(fund_id: FundId, quote: &NavQuote) -> Result<Decimal, OrderError> {
    if quote.fund_id != fund_id {
        return Err(OrderError::NavFundMismatch {
            expected: fund_id.to_string(),
            actual: quote.fund_id.to_string(),
        });
    }
    if !quote.is_validated() {
        return Err(OrderError::NavNotValidated(fund_id.to_string()));
    }
    Ok(quote.value)
}

fn generate_reference(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}-{}", prefix, duration.as_nanos() % 10_000_000_000)
}

//! Fund definition and lifecycle
//!
//! A fund owns the policy inputs the order engine reads: fee rates, the
//! fractional-units rule, and the redemption settlement delay.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, FundId, Rate};

use crate::error::FundError;

/// Types of investment funds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundKind {
    /// Equity/stock fund
    Equity,
    /// Fixed income/bond fund
    Bond,
    /// Mixed equity and bond fund
    Mixed,
}

/// Risk level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum RiskLevel {
    Low = 1,
    Medium = 2,
    High = 3,
}

/// How often the fund publishes a NAV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavFrequency {
    Daily,
    Weekly,
    Monthly,
}

/// Fund lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundState {
    /// Created but not yet open for orders
    Draft,
    /// Open for subscriptions and redemptions
    Active,
    /// Temporarily closed for orders
    Suspended,
    /// Wound up; terminal
    Liquidated,
}

/// Settlement delay applied to redemption NAV dates
///
/// A redemption submitted on day J settles at the NAV of J, J+1 or J+2
/// depending on the fund's prospectus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedemptionDelay {
    SameDay,
    NextDay,
    TwoDays,
}

impl RedemptionDelay {
    /// Number of calendar days added to the request date
    pub fn days(&self) -> u64 {
        match self {
            RedemptionDelay::SameDay => 0,
            RedemptionDelay::NextDay => 1,
            RedemptionDelay::TwoDays => 2,
        }
    }

    /// The NAV-as-of date for a request made on `request_date`
    pub fn value_date(&self, request_date: NaiveDate) -> NaiveDate {
        request_date
            .checked_add_days(Days::new(self.days()))
            .unwrap_or(request_date)
    }
}

/// Fee and rounding policy for order quantization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePolicy {
    /// Subscription (entry) fee rate
    pub subscription_fee: Rate,
    /// Redemption (exit) fee rate
    pub redemption_fee: Rate,
    /// If false, orders are quantized to whole units
    pub allow_fractional_units: bool,
}

impl FeePolicy {
    pub fn new(subscription_fee: Rate, redemption_fee: Rate, allow_fractional_units: bool) -> Self {
        Self {
            subscription_fee,
            redemption_fee,
            allow_fractional_units,
        }
    }

    /// No fees, fractional units allowed
    pub fn free_of_charge() -> Self {
        Self {
            subscription_fee: Rate::zero(),
            redemption_fee: Rate::zero(),
            allow_fractional_units: true,
        }
    }
}

/// An investment fund open to investor subscriptions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fund {
    /// Unique identifier
    pub id: FundId,
    /// Fund code (short identifier)
    pub code: String,
    /// Fund name
    pub name: String,
    /// Fund type
    pub kind: FundKind,
    /// Risk level
    pub risk_level: RiskLevel,
    /// Fund currency
    pub currency: Currency,
    /// NAV publication frequency
    pub nav_frequency: NavFrequency,
    /// Fee and rounding policy
    pub fees: FeePolicy,
    /// Settlement delay for redemption NAV dates
    pub redemption_delay: RedemptionDelay,
    /// Lifecycle state
    pub state: FundState,
    /// Fund launch date
    pub launch_date: Option<NaiveDate>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Fund {
    /// Creates a new fund in `Draft` state with no fees and fractional
    /// units allowed
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        kind: FundKind,
        risk_level: RiskLevel,
        currency: Currency,
    ) -> Self {
        Self {
            id: FundId::new_v7(),
            code: code.into(),
            name: name.into(),
            kind,
            risk_level,
            currency,
            nav_frequency: NavFrequency::Daily,
            fees: FeePolicy::free_of_charge(),
            redemption_delay: RedemptionDelay::TwoDays,
            state: FundState::Draft,
            launch_date: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the fee policy
    pub fn with_fees(mut self, fees: FeePolicy) -> Self {
        self.fees = fees;
        self
    }

    /// Sets the redemption settlement delay
    pub fn with_redemption_delay(mut self, delay: RedemptionDelay) -> Self {
        self.redemption_delay = delay;
        self
    }

    /// Sets the NAV publication frequency
    pub fn with_nav_frequency(mut self, frequency: NavFrequency) -> Self {
        self.nav_frequency = frequency;
        self
    }

    /// Sets the launch date
    pub fn with_launch_date(mut self, date: NaiveDate) -> Self {
        self.launch_date = Some(date);
        self
    }

    /// Opens the fund for orders
    ///
    /// Requires a launch date and a `Draft` or `Suspended` state.
    pub fn activate(&mut self) -> Result<(), FundError> {
        if self.launch_date.is_none() {
            return Err(FundError::MissingLaunchDate);
        }
        match self.state {
            FundState::Draft | FundState::Suspended => {
                self.state = FundState::Active;
                Ok(())
            }
            from => Err(FundError::invalid_transition(from, FundState::Active)),
        }
    }

    /// Suspends an active fund
    pub fn suspend(&mut self) -> Result<(), FundError> {
        match self.state {
            FundState::Active => {
                self.state = FundState::Suspended;
                Ok(())
            }
            from => Err(FundError::invalid_transition(from, FundState::Suspended)),
        }
    }

    /// Liquidates the fund; terminal
    pub fn liquidate(&mut self) -> Result<(), FundError> {
        match self.state {
            FundState::Active | FundState::Suspended => {
                self.state = FundState::Liquidated;
                Ok(())
            }
            from => Err(FundError::invalid_transition(from, FundState::Liquidated)),
        }
    }

    /// True if the fund currently accepts subscription/redemption orders
    pub fn is_open_for_orders(&self) -> bool {
        self.state == FundState::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn draft_fund() -> Fund {
        Fund::new("EQ001", "Global Equity Fund", FundKind::Equity, RiskLevel::High, Currency::XOF)
    }

    #[test]
    fn test_fund_creation_defaults() {
        let fund = draft_fund();

        assert_eq!(fund.code, "EQ001");
        assert_eq!(fund.state, FundState::Draft);
        assert!(fund.fees.allow_fractional_units);
        assert!(fund.fees.subscription_fee.is_zero());
    }

    #[test]
    fn test_activate_requires_launch_date() {
        let mut fund = draft_fund();
        assert!(matches!(fund.activate(), Err(FundError::MissingLaunchDate)));

        let mut fund = draft_fund().with_launch_date(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        fund.activate().unwrap();
        assert!(fund.is_open_for_orders());
    }

    #[test]
    fn test_liquidated_is_terminal() {
        let mut fund = draft_fund().with_launch_date(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        fund.activate().unwrap();
        fund.liquidate().unwrap();

        assert!(fund.activate().is_err());
        assert!(fund.suspend().is_err());
    }

    #[test]
    fn test_fee_policy_builder() {
        let fund = draft_fund().with_fees(FeePolicy::new(
            Rate::from_percentage(dec!(1)),
            Rate::from_percentage(dec!(2)),
            false,
        ));

        assert_eq!(fund.fees.subscription_fee.as_percentage(), dec!(1));
        assert_eq!(fund.fees.redemption_fee.as_percentage(), dec!(2));
        assert!(!fund.fees.allow_fractional_units);
    }

    #[test]
    fn test_redemption_delay_value_date() {
        let request = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        assert_eq!(RedemptionDelay::SameDay.value_date(request), request);
        assert_eq!(
            RedemptionDelay::TwoDays.value_date(request),
            NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
        );
    }
}

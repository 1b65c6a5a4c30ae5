//! Test Data Builders
//!
//! Builder patterns for constructing test entities with sensible
//! defaults. Tests specify only the fields that matter to them.

use core_kernel::{Currency, Rate};
use domain_fund::{
    CashAccount, FeePolicy, Fund, FundKind, Investor, InvestorRegistry, NavBoard, NavQuote,
    RedemptionDelay, RiskLevel, UnitAccount,
};

use crate::fixtures::{DateFixtures, InvestorFixtures, MoneyFixtures};

/// Builder for an active fund ready to take orders
pub struct TestFundBuilder {
    code: String,
    name: String,
    kind: FundKind,
    subscription_fee: Rate,
    redemption_fee: Rate,
    allow_fractional_units: bool,
    redemption_delay: RedemptionDelay,
}

impl Default for TestFundBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFundBuilder {
    /// Defaults: 1% entry fee, 2% exit fee, whole units, same-day delay
    pub fn new() -> Self {
        Self {
            code: "EQ001".to_string(),
            name: "Sahel Equity Fund".to_string(),
            kind: FundKind::Equity,
            subscription_fee: MoneyFixtures::subscription_fee(),
            redemption_fee: MoneyFixtures::redemption_fee(),
            allow_fractional_units: false,
            redemption_delay: RedemptionDelay::SameDay,
        }
    }

    /// Sets the fund code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets both fee rates
    pub fn with_fees(mut self, subscription: Rate, redemption: Rate) -> Self {
        self.subscription_fee = subscription;
        self.redemption_fee = redemption;
        self
    }

    /// Allows or disallows fractional units
    pub fn with_fractional_units(mut self, allowed: bool) -> Self {
        self.allow_fractional_units = allowed;
        self
    }

    /// Sets the redemption settlement delay
    pub fn with_redemption_delay(mut self, delay: RedemptionDelay) -> Self {
        self.redemption_delay = delay;
        self
    }

    /// Builds an activated fund
    pub fn build(self) -> Fund {
        let mut fund = Fund::new(
            self.code,
            self.name,
            self.kind,
            RiskLevel::High,
            MoneyFixtures::currency(),
        )
        .with_fees(FeePolicy::new(
            self.subscription_fee,
            self.redemption_fee,
            self.allow_fractional_units,
        ))
        .with_redemption_delay(self.redemption_delay)
        .with_launch_date(DateFixtures::launch_date());
        fund.activate().expect("fixture fund must activate");
        fund
    }
}

/// A fully onboarded investor: compliant, registered and validated for
/// the fund, with an active cash/unit account pair
pub struct OnboardedInvestor {
    pub investor: Investor,
    pub cash_account: CashAccount,
    pub unit_account: UnitAccount,
}

/// Onboards an investor with the fund and registers them in `registry`
pub fn onboard_investor(fund: &Fund, registry: &mut InvestorRegistry) -> OnboardedInvestor {
    let investor = InvestorFixtures::compliant();
    let investor_id = investor.id;

    registry.add_investor(investor.clone());
    registry
        .register(investor_id, fund.id)
        .expect("fixture investor registers once");
    registry
        .validate_registration(&investor_id, &fund.id)
        .expect("fixture registration exists");

    let mut cash_account = CashAccount::new(
        format!("CC-{}", &investor_id.to_string()[4..10]),
        investor_id,
        fund.id,
        fund.currency,
    );
    let mut unit_account = UnitAccount::new(
        format!("CT-{}", &investor_id.to_string()[4..10]),
        investor_id,
        fund.id,
    );
    cash_account.activate(DateFixtures::today()).expect("fresh account activates");
    unit_account.activate(DateFixtures::today()).expect("fresh account activates");

    OnboardedInvestor {
        investor,
        cash_account,
        unit_account,
    }
}

/// A NAV board with one validated quote for the fund at the reference NAV
pub fn board_with_validated_nav(fund: &Fund) -> NavBoard {
    let mut board = NavBoard::new();
    board
        .publish_validated(NavQuote::new(
            fund.id,
            DateFixtures::today(),
            MoneyFixtures::nav_per_unit(),
            Currency::XOF,
        ))
        .expect("fixture NAV is positive");
    board
}

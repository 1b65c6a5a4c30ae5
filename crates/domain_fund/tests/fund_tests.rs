//! Comprehensive tests for domain_fund

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, FundId, InvestorId, Rate};

use domain_fund::account::{AccountState, CashAccount, UnitAccount};
use domain_fund::fund::{FeePolicy, Fund, FundKind, FundState, RedemptionDelay, RiskLevel};
use domain_fund::investor::{Investor, InvestorRegistry};
use domain_fund::nav::{NavBoard, NavQuote, NavQuoteProvider, NavState};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn active_fund() -> Fund {
    let mut fund = Fund::new("EQ001", "Sahel Equity Fund", FundKind::Equity, RiskLevel::High, Currency::XOF)
        .with_fees(FeePolicy::new(
            Rate::from_percentage(dec!(1)),
            Rate::from_percentage(dec!(2)),
            false,
        ))
        .with_launch_date(date(2025, 1, 6));
    fund.activate().unwrap();
    fund
}

// ============================================================================
// Fund Lifecycle Tests
// ============================================================================

mod fund_lifecycle_tests {
    use super::*;

    #[test]
    fn test_new_fund_is_draft_and_closed() {
        let fund = Fund::new("BD001", "Bond Fund", FundKind::Bond, RiskLevel::Low, Currency::XOF);
        assert_eq!(fund.state, FundState::Draft);
        assert!(!fund.is_open_for_orders());
    }

    #[test]
    fn test_activation_opens_fund() {
        let fund = active_fund();
        assert!(fund.is_open_for_orders());
    }

    #[test]
    fn test_suspension_closes_fund() {
        let mut fund = active_fund();
        fund.suspend().unwrap();
        assert_eq!(fund.state, FundState::Suspended);
        assert!(!fund.is_open_for_orders());
    }

    #[test]
    fn test_suspended_fund_can_reactivate() {
        let mut fund = active_fund();
        fund.suspend().unwrap();
        fund.activate().unwrap();
        assert!(fund.is_open_for_orders());
    }

    #[test]
    fn test_liquidation_from_suspended() {
        let mut fund = active_fund();
        fund.suspend().unwrap();
        fund.liquidate().unwrap();
        assert_eq!(fund.state, FundState::Liquidated);
    }

    #[test]
    fn test_draft_fund_cannot_liquidate() {
        let mut fund = Fund::new("BD001", "Bond Fund", FundKind::Bond, RiskLevel::Low, Currency::XOF);
        assert!(fund.liquidate().is_err());
    }
}

// ============================================================================
// Fee Policy & Settlement Delay Tests
// ============================================================================

mod fee_policy_tests {
    use super::*;

    #[test]
    fn test_fee_policy_fields() {
        let fund = active_fund();
        assert_eq!(fund.fees.subscription_fee.as_percentage(), dec!(1));
        assert_eq!(fund.fees.redemption_fee.as_percentage(), dec!(2));
        assert!(!fund.fees.allow_fractional_units);
    }

    #[test]
    fn test_free_of_charge_policy() {
        let policy = FeePolicy::free_of_charge();
        assert!(policy.subscription_fee.is_zero());
        assert!(policy.redemption_fee.is_zero());
        assert!(policy.allow_fractional_units);
    }

    #[test]
    fn test_redemption_delay_days() {
        assert_eq!(RedemptionDelay::SameDay.days(), 0);
        assert_eq!(RedemptionDelay::NextDay.days(), 1);
        assert_eq!(RedemptionDelay::TwoDays.days(), 2);
    }

    #[test]
    fn test_redemption_value_date_crosses_month_end() {
        let request = date(2025, 1, 31);
        assert_eq!(RedemptionDelay::TwoDays.value_date(request), date(2025, 2, 2));
    }
}

// ============================================================================
// Account Tests
// ============================================================================

mod account_tests {
    use super::*;

    #[test]
    fn test_account_pair_for_investor() {
        let investor_id = InvestorId::new_v7();
        let fund_id = FundId::new_v7();

        let mut cash = CashAccount::new("CC-0001", investor_id, fund_id, Currency::XOF);
        let mut units = UnitAccount::new("CT-0001", investor_id, fund_id);

        cash.activate(date(2025, 2, 3)).unwrap();
        units.activate(date(2025, 2, 3)).unwrap();

        assert_eq!(cash.state, AccountState::Active);
        assert_eq!(units.state, AccountState::Active);
        assert_eq!(cash.investor_id, units.investor_id);
    }

    #[test]
    fn test_accounts_have_no_balance_field() {
        // Compile-time statement of the design: the account type carries
        // identity and lifecycle only; balances come from the ledger.
        let cash = CashAccount::new("CC-0002", InvestorId::new_v7(), FundId::new_v7(), Currency::XOF);
        let json = serde_json::to_value(&cash).unwrap();
        assert!(json.get("balance").is_none());
        assert!(json.get("total_units").is_none());
    }
}

// ============================================================================
// NAV Tests
// ============================================================================

mod nav_tests {
    use super::*;

    #[test]
    fn test_nav_quote_workflow() {
        let mut quote = NavQuote::new(FundId::new_v7(), date(2025, 1, 6), dec!(10000), Currency::XOF);
        assert_eq!(quote.state, NavState::Draft);

        quote.mark_computed();
        assert_eq!(quote.state, NavState::Computed);

        quote.validate().unwrap();
        assert!(quote.is_validated());
    }

    #[test]
    fn test_negative_nav_cannot_validate() {
        let mut quote = NavQuote::new(FundId::new_v7(), date(2025, 1, 6), dec!(-10), Currency::XOF);
        assert!(quote.validate().is_err());
    }

    #[test]
    fn test_board_serves_latest_validated_per_fund() {
        let fund_a = FundId::new_v7();
        let fund_b = FundId::new_v7();
        let mut board = NavBoard::new();

        board
            .publish_validated(NavQuote::new(fund_a, date(2025, 1, 6), dec!(10000), Currency::XOF))
            .unwrap();
        board
            .publish_validated(NavQuote::new(fund_a, date(2025, 1, 7), dec!(10100), Currency::XOF))
            .unwrap();
        board
            .publish_validated(NavQuote::new(fund_b, date(2025, 1, 7), dec!(2500), Currency::XOF))
            .unwrap();

        assert_eq!(board.current_nav(&fund_a).unwrap().value, dec!(10100));
        assert_eq!(board.current_nav(&fund_b).unwrap().value, dec!(2500));
    }

    #[test]
    fn test_quote_with_source_and_share_class() {
        let quote = NavQuote::new(FundId::new_v7(), date(2025, 1, 6), dec!(10000), Currency::XOF)
            .with_source("pricing-feed")
            .with_share_class(core_kernel::ShareClassId::new_v7());

        assert_eq!(quote.source.as_deref(), Some("pricing-feed"));
        assert!(quote.share_class.is_some());
    }
}

// ============================================================================
// Eligibility Tests
// ============================================================================

mod eligibility_tests {
    use super::*;

    #[test]
    fn test_full_onboarding_path() {
        let mut registry = InvestorRegistry::new();
        let mut investor = Investor::new("Fatou Ndiaye");
        investor.mark_compliant();
        let investor_id = investor.id;
        let fund_id = FundId::new_v7();

        registry.add_investor(investor);
        registry.register(investor_id, fund_id).unwrap();
        registry.validate_registration(&investor_id, &fund_id).unwrap();

        assert!(registry.is_eligible(&investor_id, &fund_id));
    }

    #[test]
    fn test_eligibility_is_per_fund() {
        let mut registry = InvestorRegistry::new();
        let mut investor = Investor::new("Fatou Ndiaye");
        investor.mark_compliant();
        let investor_id = investor.id;
        let fund_a = FundId::new_v7();
        let fund_b = FundId::new_v7();

        registry.add_investor(investor);
        registry.register(investor_id, fund_a).unwrap();
        registry.validate_registration(&investor_id, &fund_a).unwrap();

        assert!(registry.is_eligible(&investor_id, &fund_a));
        assert!(!registry.is_eligible(&investor_id, &fund_b));
    }
}

//! Collaborator ports consumed at settlement
//!
//! The compliance decision itself (KYC workflows, AML screening) lives
//! outside the engine; settlement only asks a yes/no question through
//! this port.

use core_kernel::{FundId, InvestorId};
use domain_fund::InvestorRegistry;

/// Eligibility check performed before money or units move
pub trait ComplianceGate {
    /// True if the investor may settle orders against the fund
    fn is_investor_eligible(&self, investor_id: &InvestorId, fund_id: &FundId) -> bool;
}

impl ComplianceGate for InvestorRegistry {
    fn is_investor_eligible(&self, investor_id: &InvestorId, fund_id: &FundId) -> bool {
        self.is_eligible(investor_id, fund_id)
    }
}

/// A gate that approves everyone; for tests and bootstrap tooling
#[derive(Debug, Default)]
pub struct OpenGate;

impl ComplianceGate for OpenGate {
    fn is_investor_eligible(&self, _investor_id: &InvestorId, _fund_id: &FundId) -> bool {
        true
    }
}

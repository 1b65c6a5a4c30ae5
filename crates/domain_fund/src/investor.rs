//! Investors and per-fund eligibility
//!
//! An investor must be KYC-compliant and hold a validated registration
//! with a fund before the order engine will settle for them. The registry
//! here is the in-process view the compliance gate consults; onboarding
//! workflows themselves live outside the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::{FundId, InvestorId};

use crate::error::FundError;

/// KYC standing of an investor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KycStatus {
    /// Checks not yet complete
    Pending,
    /// Cleared for trading
    Compliant,
    /// Failed checks
    NonCompliant,
}

/// An investor known to the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investor {
    /// Unique identifier
    pub id: InvestorId,
    /// Display name
    pub name: String,
    /// KYC standing
    pub kyc_status: KycStatus,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Investor {
    /// Creates a new investor with pending KYC
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: InvestorId::new_v7(),
            name: name.into(),
            kyc_status: KycStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Marks the investor KYC-compliant
    pub fn mark_compliant(&mut self) {
        self.kyc_status = KycStatus::Compliant;
    }

    /// Marks the investor non-compliant
    pub fn mark_non_compliant(&mut self) {
        self.kyc_status = KycStatus::NonCompliant;
    }
}

/// State of an investor's registration with one fund
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityState {
    Pending,
    Validated,
    Rejected,
}

/// An investor's registration with a fund
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundRegistration {
    pub investor_id: InvestorId,
    pub fund_id: FundId,
    pub state: EligibilityState,
    pub registered_at: DateTime<Utc>,
}

/// In-process registry of investors and their fund registrations
#[derive(Debug, Default)]
pub struct InvestorRegistry {
    investors: HashMap<InvestorId, Investor>,
    registrations: Vec<FundRegistration>,
}

impl InvestorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an investor to the registry
    pub fn add_investor(&mut self, investor: Investor) {
        self.investors.insert(investor.id, investor);
    }

    /// Looks up an investor
    pub fn investor(&self, id: &InvestorId) -> Option<&Investor> {
        self.investors.get(id)
    }

    /// Registers an investor with a fund (pending validation)
    pub fn register(&mut self, investor_id: InvestorId, fund_id: FundId) -> Result<(), FundError> {
        if self.registration(&investor_id, &fund_id).is_some() {
            return Err(FundError::AlreadyRegistered {
                investor: investor_id.to_string(),
                fund: fund_id.to_string(),
            });
        }
        self.registrations.push(FundRegistration {
            investor_id,
            fund_id,
            state: EligibilityState::Pending,
            registered_at: Utc::now(),
        });
        Ok(())
    }

    /// Validates a pending registration
    pub fn validate_registration(
        &mut self,
        investor_id: &InvestorId,
        fund_id: &FundId,
    ) -> Result<(), FundError> {
        let registration = self
            .registration_mut(investor_id, fund_id)
            .ok_or_else(|| FundError::RegistrationNotFound {
                investor: investor_id.to_string(),
                fund: fund_id.to_string(),
            })?;
        registration.state = EligibilityState::Validated;
        Ok(())
    }

    /// Rejects a registration
    pub fn reject_registration(
        &mut self,
        investor_id: &InvestorId,
        fund_id: &FundId,
    ) -> Result<(), FundError> {
        let registration = self
            .registration_mut(investor_id, fund_id)
            .ok_or_else(|| FundError::RegistrationNotFound {
                investor: investor_id.to_string(),
                fund: fund_id.to_string(),
            })?;
        registration.state = EligibilityState::Rejected;
        Ok(())
    }

    /// True if the investor is KYC-compliant and validated for the fund
    pub fn is_eligible(&self, investor_id: &InvestorId, fund_id: &FundId) -> bool {
        let compliant = self
            .investors
            .get(investor_id)
            .map(|i| i.kyc_status == KycStatus::Compliant)
            .unwrap_or(false);

        let validated = self
            .registration(investor_id, fund_id)
            .map(|r| r.state == EligibilityState::Validated)
            .unwrap_or(false);

        compliant && validated
    }

    fn registration(&self, investor_id: &InvestorId, fund_id: &FundId) -> Option<&FundRegistration> {
        self.registrations
            .iter()
            .find(|r| &r.investor_id == investor_id && &r.fund_id == fund_id)
    }

    fn registration_mut(
        &mut self,
        investor_id: &InvestorId,
        fund_id: &FundId,
    ) -> Option<&mut FundRegistration> {
        self.registrations
            .iter_mut()
            .find(|r| &r.investor_id == investor_id && &r.fund_id == fund_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compliant_investor() -> Investor {
        let mut investor = Investor::new("Aissata Diallo");
        investor.mark_compliant();
        investor
    }

    #[test]
    fn test_eligibility_requires_both_kyc_and_registration() {
        let mut registry = InvestorRegistry::new();
        let investor = compliant_investor();
        let investor_id = investor.id;
        let fund_id = FundId::new_v7();
        registry.add_investor(investor);

        // Compliant but not registered
        assert!(!registry.is_eligible(&investor_id, &fund_id));

        registry.register(investor_id, fund_id).unwrap();
        // Registered but still pending
        assert!(!registry.is_eligible(&investor_id, &fund_id));

        registry.validate_registration(&investor_id, &fund_id).unwrap();
        assert!(registry.is_eligible(&investor_id, &fund_id));
    }

    #[test]
    fn test_non_compliant_investor_is_never_eligible() {
        let mut registry = InvestorRegistry::new();
        let mut investor = Investor::new("Moussa Traore");
        investor.mark_non_compliant();
        let investor_id = investor.id;
        let fund_id = FundId::new_v7();
        registry.add_investor(investor);
        registry.register(investor_id, fund_id).unwrap();
        registry.validate_registration(&investor_id, &fund_id).unwrap();

        assert!(!registry.is_eligible(&investor_id, &fund_id));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = InvestorRegistry::new();
        let investor = compliant_investor();
        let investor_id = investor.id;
        let fund_id = FundId::new_v7();
        registry.add_investor(investor);

        registry.register(investor_id, fund_id).unwrap();
        assert!(matches!(
            registry.register(investor_id, fund_id),
            Err(FundError::AlreadyRegistered { .. })
        ));
    }

    #[test]
    fn test_rejected_registration_blocks_eligibility() {
        let mut registry = InvestorRegistry::new();
        let investor = compliant_investor();
        let investor_id = investor.id;
        let fund_id = FundId::new_v7();
        registry.add_investor(investor);
        registry.register(investor_id, fund_id).unwrap();
        registry.reject_registration(&investor_id, &fund_id).unwrap();

        assert!(!registry.is_eligible(&investor_id, &fund_id));
    }
}

//! Fixed-Income Domain - Schedule & Yield Engine
//!
//! A stateless calculation service over an instrument's static terms:
//!
//! - coupon schedules and bullet-bond amortization tables
//! - accrued interest (Actual/360)
//! - yield to maturity by Newton-Raphson, plus Macaulay/modified
//!   duration and convexity
//! - corporate-action instrument events with ratio validation
//!
//! It feeds valuation reference data to the NAV side of the system and
//! never writes to the ledger. Money and unit quantities stay in
//! `Decimal`; root-finding on discount factors runs in `f64`.

pub mod terms;
pub mod schedule;
pub mod yield_engine;
pub mod event;
pub mod error;

pub use terms::{BondTerms, CouponFrequency};
pub use schedule::{
    amortization_schedule, coupon_amount, coupon_dates, coupon_schedule, days_to_next_coupon,
    next_coupon_date, AmortizationLine, CouponEvent,
};
pub use yield_engine::{analyze, cash_flows, Cashflow, YieldReport};
pub use event::{EventState, InstrumentEvent, InstrumentEventKind};
pub use error::BondError;

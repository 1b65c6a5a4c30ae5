//! Order Domain - Settlement Engine
//!
//! This crate turns a cash amount or a unit count into a fund-share
//! transaction at a published NAV. It owns:
//!
//! - the **quantization & fee engine**: pure functions mapping
//!   (amount or units, NAV, fee rate, fractional policy) to
//!   (units, cash used, fee, residual)
//! - the **order lifecycle**: draft -> submitted -> validated -> accounted,
//!   with cancellation from any non-terminal state and an explicit
//!   re-confirmation step when the applicable NAV drifts between submit
//!   and validation
//! - **settlement**: the single place ledger entries are written, as one
//!   atomic batch per order
//! - **cash operations**: deposits and withdrawals outside the order flow
//!
//! # Failure semantics
//!
//! Every guard violation is a typed, recoverable error. Ledger writes
//! happen only inside `Order::settle`, after every guard has passed, so a
//! failed transition never leaves a partial ledger write behind.

pub mod quantize;
pub mod order;
pub mod confirmation;
pub mod ports;
pub mod cash_ops;
pub mod error;

pub use quantize::{
    quote_subscription, quote_redemption, SubscriptionQuote, RedemptionQuote, QuantizeError,
};
pub use order::{Order, OrderRequest, OrderQuote, OrderState, RedemptionQuantity};
pub use confirmation::{PendingConfirmation, ValidationOutcome};
pub use ports::{ComplianceGate, OpenGate};
pub use cash_ops::{deposit, withdraw};
pub use error::OrderError;

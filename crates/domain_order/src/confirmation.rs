//! NAV-drift re-confirmation
//!
//! When the validated NAV drifts between submit and validation, the
//! transition does not complete on its own: `Order::validate` returns a
//! `PendingConfirmation` the operator must pass back through
//! `Order::acknowledge`. The pending actions form a closed enum resolved
//! by an explicit match, never by looking a method up at runtime.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::OrderId;

/// Result of an order validation attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationOutcome {
    /// NAV unchanged since submit; the order is now validated
    Validated,
    /// NAV drifted; the operator must acknowledge before validation
    ConfirmationRequired(PendingConfirmation),
}

/// Operator acknowledgments the engine may require
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingConfirmation {
    /// Re-validate the order at a NAV that changed since submission
    RevalidateAtNewNav {
        /// Order awaiting confirmation
        order_id: OrderId,
        /// NAV captured at submit time
        previous_nav: Decimal,
        /// Currently validated NAV that will be applied instead
        new_nav: Decimal,
    },
}

impl PendingConfirmation {
    /// The order this confirmation belongs to
    pub fn order_id(&self) -> OrderId {
        match self {
            PendingConfirmation::RevalidateAtNewNav { order_id, .. } => *order_id,
        }
    }
}

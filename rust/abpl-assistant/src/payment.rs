//! How much of a booking's price must be paid up front.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::AssistantError;

/// Whether a booking is being held or settled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    #[serde(alias = "reserve")]
    Reservation,
    #[serde(alias = "confirm")]
    Confirmation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Reservation => write!(f, "reservation"),
            Stage::Confirmation => write!(f, "confirmation"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentPolicy {
    deposit_percent: u64,
}

impl Default for PaymentPolicy {
    fn default() -> Self {
        PaymentPolicy { deposit_percent: 60 }
    }
}

impl PaymentPolicy {
    /// A policy whose reservations need `percent` of the price. Values above
    /// 100 are clamped.
    pub fn with_deposit(percent: u64) -> Self {
        PaymentPolicy {
            deposit_percent: percent.min(100),
        }
    }

    pub fn required_amount(&self, stage: Stage, total: Amount) -> Amount {
        match stage {
            Stage::Reservation => total.percent(self.deposit_percent),
            Stage::Confirmation => total,
        }
    }

    pub fn check(&self, stage: Stage, total: Amount, paid: Amount) -> Result<(), AssistantError> {
        let required = self.required_amount(stage, total);
        if paid < required {
            return Err(AssistantError::InsufficientPayment {
                stage,
                total,
                required,
                paid,
            });
        }
        Ok(())
    }
}

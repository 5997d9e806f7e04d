//! Plan events — the age-triggered milestones a projection run emits.
//!
//! RULE: The ledger state machine communicates its discrete transitions
//! ONLY through these events. Variants are a closed set; tests assert the
//! one-shot transitions fired exactly once by counting them.

use crate::ledger::AccountKind;
use crate::types::Age;
use serde::{Deserialize, Serialize};

/// Every discrete milestone emitted during a projection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanEvent {
    /// Age-55 closure: the special account is emptied and the retirement
    /// sum set aside. Amount fields record where every dollar went.
    RetirementSumSetAside {
        age: Age,
        target: f64,
        from_special: f64,
        from_ordinary: f64,
        returned_to_ordinary: f64,
    },

    /// Age-65 annuitization: the retirement balance converts to a fixed
    /// monthly payout and the account zeroes.
    AnnuityActivated {
        age: Age,
        converted_balance: f64,
        monthly_payout: f64,
    },

    /// Medisave ran above its cap this year; the year's total excess was
    /// redirected.
    MedisaveOverflow {
        age: Age,
        amount: f64,
        redirected_to: AccountKind,
    },

    /// First period in which the decumulation waterfall could not fully
    /// fund the inflated expense from annuity + cash + investments.
    WealthDepleted {
        age: Age,
        unmet_monthly_expense: f64,
    },
}

//! Monthly wage-contribution calculator.
//!
//! Clamps pay to the wage ceiling, applies the statutory rate and
//! allocation tables, and reports the split plus take-home pay. Income
//! above the ceiling is contribution-exempt and reported as excess, not
//! contributed. No error paths: pay coerces to a non-negative finite value.

use crate::config::PlanConfig;
use crate::rates::AgeRateProfile;
use crate::types::{clamp_money, Age};
use serde::Serialize;

/// One month's contribution, split across parties and accounts.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ContributionBreakdown {
    pub employee: f64,
    pub employer: f64,
    pub total:    f64,
    pub ordinary: f64,
    pub special:  f64,
    pub medisave: f64,
    /// Gross minus the employee share only — the employer share is never
    /// deducted from pay.
    pub take_home: f64,
    /// Wage above the ceiling, exempt from contribution.
    pub excess_wage: f64,
}

/// Compute one month's contribution for `gross_pay` at `age`.
pub fn monthly_contribution(gross_pay: f64, age: Age, config: &PlanConfig) -> ContributionBreakdown {
    let gross = clamp_money(gross_pay);
    let capped = gross.min(config.wage_ceiling);
    let excess_wage = gross - capped;

    let profile = AgeRateProfile::for_age(age);
    let employee = capped * profile.employee;
    let employer = capped * profile.employer;

    ContributionBreakdown {
        employee,
        employer,
        total: employee + employer,
        ordinary: capped * profile.ordinary,
        special: capped * profile.special,
        medisave: capped * profile.medisave,
        take_home: gross - employee,
        excess_wage,
    }
}

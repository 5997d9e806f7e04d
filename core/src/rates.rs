//! Statutory age-banded contribution and allocation tables.
//!
//! RULE: These are pure lookups with no module-level state. Callers receive
//! a fresh `AgeRateProfile` per call and never mutate shared tables.
//!
//! Bands are contiguous and exhaustive from age 0 through 70+. For every
//! band, employee + employer equals the band total, and the three account
//! shares sum to that same total — allocation fully accounts for the
//! contribution. `rates_are_consistent` is the test hook for both sums.

use crate::types::Age;
use serde::Serialize;

/// Contribution and allocation rates for one age, as fractions of wage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeRateProfile {
    pub employee: f64,
    pub employer: f64,
    pub ordinary: f64,
    pub special:  f64,
    pub medisave: f64,
}

impl AgeRateProfile {
    pub fn for_age(age: Age) -> Self {
        let (employee, employer) = contribution_rates(age);
        let (ordinary, special, medisave) = allocation_shares(age);
        Self { employee, employer, ordinary, special, medisave }
    }

    /// Total mandatory contribution as a fraction of wage.
    pub fn total(&self) -> f64 {
        self.employee + self.employer
    }
}

/// (employee, employer) contribution rates for an age.
pub fn contribution_rates(age: Age) -> (f64, f64) {
    match age {
        0..=55 => (0.20, 0.17),
        56..=60 => (0.13, 0.13),
        61..=65 => (0.075, 0.09),
        _ => (0.05, 0.075),
    }
}

/// (ordinary, special, medisave) allocation shares for an age, as
/// fractions of wage. The three always sum to the band's total rate.
pub fn allocation_shares(age: Age) -> (f64, f64, f64) {
    match age {
        0..=35 => (0.23, 0.06, 0.08),
        36..=45 => (0.21, 0.07, 0.09),
        46..=50 => (0.19, 0.08, 0.10),
        51..=55 => (0.15, 0.115, 0.105),
        56..=60 => (0.12, 0.035, 0.105),
        61..=65 => (0.035, 0.025, 0.105),
        _ => (0.01, 0.01, 0.105),
    }
}

/// True when both invariants hold at `age`: contribution split matches the
/// band total, and allocation shares account for every contributed dollar.
pub fn rates_are_consistent(age: Age) -> bool {
    let p = AgeRateProfile::for_age(age);
    let allocated = p.ordinary + p.special + p.medisave;
    (p.total() - allocated).abs() < 1e-9
}

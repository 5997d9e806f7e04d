//! Engine configuration — scheme constants and model defaults.
//!
//! Every constant the projection models depend on lives here, with the
//! documented default values inline in the Default impl. Callers may load
//! a partial JSON document over the defaults; absent fields keep them.
//!
//! Age-banded contribution and allocation rates are NOT configuration —
//! they are the statutory tables in `rates.rs`.

use crate::error::EngineResult;
use crate::types::Age;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Maximum monthly wage subject to mandatory contribution.
    pub wage_ceiling: f64,
    /// Age at which wage contributions stop. Fixed at 65 — the product
    /// has shipped with both 65 and the chosen retirement age at various
    /// times; 65 is the canonical behavior pending sign-off.
    pub contribution_cutoff_age: Age,

    /// Health-savings cap at run start.
    pub medisave_cap_base: f64,
    /// Annual growth applied to the cap until the freeze age.
    pub medisave_cap_growth: f64,
    /// Cap stops inflating at this age.
    pub medisave_cap_freeze_age: Age,

    /// Retirement-sum target at run start; inflated annually to age 55.
    pub retirement_sum_base: f64,
    pub retirement_sum_growth: f64,

    /// Monthly annuity payout per dollar of retirement balance at 65.
    /// Derived from a reference payout of ≈$1,530/month on a $192,000 sum.
    pub annuity_payout_per_dollar: f64,

    /// Simulation horizon — projections and solvency timelines stop here.
    pub horizon_age: Age,

    pub education: EducationConfig,
    pub life_event: LifeEventConfig,
    pub monte_carlo: MonteCarloConfig,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            wage_ceiling: 6_000.0,
            contribution_cutoff_age: 65,
            medisave_cap_base: 66_000.0,
            medisave_cap_growth: 0.045,
            medisave_cap_freeze_age: 65,
            retirement_sum_base: 192_000.0,
            retirement_sum_growth: 0.03,
            annuity_payout_per_dollar: 1_530.0 / 192_000.0,
            horizon_age: 90,
            education: EducationConfig::default(),
            life_event: LifeEventConfig::default(),
            monte_carlo: MonteCarloConfig::default(),
        }
    }
}

impl PlanConfig {
    /// Parse a (possibly partial) JSON document over the defaults.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Per-run economic assumptions. These ride with the simulation inputs
/// rather than the scheme config because advisors override them per
/// scenario; every field has a documented default if absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateAssumptions {
    /// Annual interest on the ordinary account.
    #[serde(deserialize_with = "crate::types::lenient_f64")]
    pub ordinary: f64,
    /// Annual interest on the special, medisave, and retirement accounts.
    #[serde(deserialize_with = "crate::types::lenient_f64")]
    pub savings: f64,
    /// Annual interest on bank cash.
    #[serde(deserialize_with = "crate::types::lenient_f64")]
    pub cash: f64,
    /// Mean annual return on market investments.
    #[serde(deserialize_with = "crate::types::lenient_f64")]
    pub investment: f64,
    /// Annual expense inflation.
    #[serde(deserialize_with = "crate::types::lenient_f64")]
    pub inflation: f64,
}

impl Default for RateAssumptions {
    fn default() -> Self {
        Self {
            ordinary: 0.025,
            savings: 0.04,
            cash: 0.005,
            investment: 0.05,
            inflation: 0.03,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationConfig {
    /// Monthly cost during the schooling stage.
    pub monthly_schooling_cost: f64,
    /// Annual cost inflation applied to both stages.
    pub inflation: f64,
    /// Age the schooling stage begins.
    pub schooling_start_age: Age,
    /// Schooling stage length in years.
    pub schooling_years: Age,
    /// Annual cost during the university stage.
    pub university_annual_cost: f64,
    /// University stage length in years.
    pub university_years: Age,
    /// Extra years before university for male dependents
    /// (national-service timing).
    pub male_university_offset: Age,
}

impl Default for EducationConfig {
    fn default() -> Self {
        Self {
            monthly_schooling_cost: 500.0,
            inflation: 0.03,
            schooling_start_age: 7,
            schooling_years: 12,
            university_annual_cost: 30_000.0,
            university_years: 4,
            male_university_offset: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeEventConfig {
    /// Fraction of the monthly expense baseline owed to the family per
    /// month of the support horizon in the death model. Flat — NOT
    /// inflation-adjusted (canonical behavior pending sign-off; the
    /// product has shipped both).
    pub support_fraction: f64,
    /// Default support horizon when a death scenario does not supply one.
    pub default_support_years: Age,
    /// Default final-expense allowance.
    pub default_final_expense: f64,
}

impl Default for LifeEventConfig {
    fn default() -> Self {
        Self {
            support_fraction: 0.70,
            default_support_years: 20,
            default_final_expense: 15_000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Simulation passes per band computation.
    pub default_passes: usize,
    /// Annual return volatility (sigma).
    pub volatility: f64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            default_passes: 500,
            volatility: 0.12,
        }
    }
}

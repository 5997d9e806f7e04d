//! Life-event analyzer — stress-testing a plan against discrete events.
//!
//! Two sibling models behind one scenario enum and one solver entry point:
//!
//!   - Death          ⇒ capital-needs gap (assets minus liabilities at the
//!                      event age).
//!   - Disability and
//!     CriticalIllness ⇒ forward solvency timeline to the horizon age,
//!                      reporting the first age liquid wealth would go
//!                      negative.
//!
//! Both share `projected_assets`: a simplified fixed-compounding roll of
//! today's cash, investment, and liquid scheme balances to the event age.
//! It ignores withdrawal directives and future contributions — the
//! stress-test is deliberately conservative about what is there when the
//! event lands.

use crate::config::PlanConfig;
use crate::education::remaining_education_cost;
use crate::profile::{ClientProfile, DEFAULT_RETIREMENT_AGE};
use crate::types::{clamp_money, Age};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A hypothetical event to stress-test, with its scenario-specific
/// parameters. Consumed once per analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LifeEventScenario {
    Death {
        #[serde(deserialize_with = "crate::types::lenient_age")]
        event_age: Age,
        /// Years of family support to fund.
        #[serde(deserialize_with = "crate::types::lenient_age")]
        support_years: Age,
        /// Fixed final-expense allowance.
        #[serde(deserialize_with = "crate::types::lenient_f64")]
        final_expense: f64,
    },
    Disability {
        #[serde(deserialize_with = "crate::types::lenient_age")]
        event_age: Age,
        /// Multiplier on the inflated expense baseline from the event on.
        #[serde(deserialize_with = "crate::types::lenient_f64")]
        expense_factor: f64,
    },
    CriticalIllness {
        #[serde(deserialize_with = "crate::types::lenient_age")]
        event_age: Age,
        #[serde(deserialize_with = "crate::types::lenient_f64")]
        expense_factor: f64,
        /// Income resumes this many years after the event (and only
        /// before the retirement age). Disability never restores income.
        #[serde(deserialize_with = "crate::types::lenient_age")]
        recovery_years: Age,
    },
}

impl LifeEventScenario {
    pub fn event_age(&self) -> Age {
        match self {
            Self::Death { event_age, .. }
            | Self::Disability { event_age, .. }
            | Self::CriticalIllness { event_age, .. } => *event_age,
        }
    }
}

/// Balances rolled forward to the event age.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProjectedAssets {
    pub cash: f64,
    pub investments: f64,
    pub scheme_liquid: f64,
}

impl ProjectedAssets {
    pub fn total(&self) -> f64 {
        self.cash + self.investments + self.scheme_liquid
    }
}

/// Capital-needs result for a death scenario.
#[derive(Debug, Clone, Serialize)]
pub struct CapitalNeedsReport {
    pub event_age: Age,
    pub mortgage_liability: f64,
    pub education_liability: f64,
    pub family_support_liability: f64,
    pub final_expense: f64,
    pub total_liabilities: f64,
    pub projected_assets: ProjectedAssets,
    pub insurance_payout: f64,
    pub total_assets: f64,
    /// Assets minus liabilities. Positive means surplus.
    pub gap: f64,
    pub surplus: bool,
}

/// One year of the post-event solvency roll.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SolvencyYear {
    pub age: Age,
    pub expense: f64,
    pub income: f64,
    pub cash: f64,
    pub investments: f64,
    /// Expense left unfunded after liquidation this year.
    pub unmet: f64,
}

/// Solvency result for a disability or critical-illness scenario.
#[derive(Debug, Clone, Serialize)]
pub struct SolvencyTimeline {
    pub event_age: Age,
    pub years: Vec<SolvencyYear>,
    /// First age liquid wealth would go negative. None means the plan
    /// stays solvent through the horizon.
    pub depletion_age: Option<Age>,
    pub solvent: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LifeEventOutcome {
    CapitalNeeds(CapitalNeedsReport),
    Solvency(SolvencyTimeline),
}

/// Single dispatch point for every scenario kind.
pub fn analyze(
    scenario: &LifeEventScenario,
    profile: &ClientProfile,
    today: NaiveDate,
    config: &PlanConfig,
) -> LifeEventOutcome {
    let current_age = profile.current_age(today);
    let event_age = scenario.event_age().max(current_age);

    match scenario {
        LifeEventScenario::Death {
            support_years,
            final_expense,
            ..
        } => LifeEventOutcome::CapitalNeeds(capital_needs(
            profile,
            today,
            config,
            current_age,
            event_age,
            *support_years,
            clamp_money(*final_expense),
        )),
        LifeEventScenario::Disability { expense_factor, .. } => {
            LifeEventOutcome::Solvency(solvency_timeline(
                profile,
                config,
                current_age,
                event_age,
                *expense_factor,
                profile.insurance.disability,
                None,
            ))
        }
        LifeEventScenario::CriticalIllness {
            expense_factor,
            recovery_years,
            ..
        } => LifeEventOutcome::Solvency(solvency_timeline(
            profile,
            config,
            current_age,
            event_age,
            *expense_factor,
            profile.insurance.critical_illness,
            Some(*recovery_years),
        )),
    }
}

/// Roll today's balances to `target_age` with fixed annual compounding.
pub fn projected_assets(
    profile: &ClientProfile,
    current_age: Age,
    target_age: Age,
) -> ProjectedAssets {
    let years = target_age.saturating_sub(current_age) as i32;
    let rates = &profile.rates;
    ProjectedAssets {
        cash: clamp_money(profile.cash) * (1.0 + rates.cash).powi(years),
        investments: clamp_money(profile.investments) * (1.0 + rates.investment).powi(years),
        scheme_liquid: clamp_money(profile.accounts.ordinary) * (1.0 + rates.ordinary).powi(years)
            + clamp_money(profile.accounts.special) * (1.0 + rates.savings).powi(years),
    }
}

fn capital_needs(
    profile: &ClientProfile,
    today: NaiveDate,
    config: &PlanConfig,
    current_age: Age,
    event_age: Age,
    support_years: Age,
    final_expense: f64,
) -> CapitalNeedsReport {
    let assets = projected_assets(profile, current_age, event_age);
    let event_date = add_years(today, (event_age - current_age) as i32);

    let mortgage_liability = profile
        .property
        .map(|loan| loan.outstanding_at_age(event_age))
        .unwrap_or(0.0);

    let education_liability: f64 = profile
        .dependents
        .iter()
        .map(|d| remaining_education_cost(d.birth_date, d.gender, event_date, &config.education))
        .sum();

    // Flat support liability — deliberately not inflation-adjusted.
    let family_support_liability = config.life_event.support_fraction
        * clamp_money(profile.monthly_expense)
        * 12.0
        * support_years as f64;

    let total_liabilities =
        mortgage_liability + education_liability + family_support_liability + final_expense;
    let insurance_payout = clamp_money(profile.insurance.death);
    let total_assets = assets.total() + insurance_payout;
    let gap = total_assets - total_liabilities;

    log::debug!(
        "death@{event_age}: liabilities={total_liabilities:.0} assets={total_assets:.0} \
         gap={gap:.0}"
    );

    CapitalNeedsReport {
        event_age,
        mortgage_liability,
        education_liability,
        family_support_liability,
        final_expense,
        total_liabilities,
        projected_assets: assets,
        insurance_payout,
        total_assets,
        gap,
        surplus: gap >= 0.0,
    }
}

fn solvency_timeline(
    profile: &ClientProfile,
    config: &PlanConfig,
    current_age: Age,
    event_age: Age,
    expense_factor: f64,
    insurance_payout: f64,
    recovery_years: Option<Age>,
) -> SolvencyTimeline {
    let snapshot = projected_assets(profile, current_age, event_age);
    // Disability payouts release straight into cash; illness payouts are
    // nominally segregated but spendable the same way.
    let mut cash = snapshot.cash + clamp_money(insurance_payout);
    let mut investments = snapshot.investments;

    let expense_factor = if expense_factor.is_finite() {
        expense_factor.max(0.0)
    } else {
        1.0
    };
    let retirement_age = if profile.person.target_retirement_age == 0 {
        DEFAULT_RETIREMENT_AGE
    } else {
        profile.person.target_retirement_age
    };
    let annual_income = clamp_money(profile.person.gross_monthly_income) * 12.0;
    let monthly_expense = clamp_money(profile.monthly_expense);

    let mut years = Vec::new();
    let mut depletion_age = None;

    for age in event_age..=config.horizon_age.max(event_age) {
        let years_from_now = (age - current_age) as i32;
        let expense = monthly_expense
            * 12.0
            * (1.0 + profile.rates.inflation).powi(years_from_now)
            * expense_factor;
        let income = match recovery_years {
            Some(recovery) if age >= event_age + recovery && age < retirement_age => {
                annual_income
            }
            _ => 0.0,
        };

        let mut unmet = 0.0;
        if income >= expense {
            cash += income - expense;
        } else {
            let mut deficit = expense - income;
            let from_cash = deficit.min(cash);
            cash -= from_cash;
            deficit -= from_cash;
            let from_investments = deficit.min(investments);
            investments -= from_investments;
            deficit -= from_investments;
            unmet = deficit;
        }

        years.push(SolvencyYear {
            age,
            expense,
            income,
            cash,
            investments,
            unmet,
        });

        if unmet > 0.0 {
            depletion_age = Some(age);
            break;
        }

        // Remaining balances grow into the next year.
        cash *= 1.0 + profile.rates.cash;
        investments *= 1.0 + profile.rates.investment;
    }

    let solvent = depletion_age.is_none();
    log::debug!(
        "solvency@{event_age}: factor={expense_factor:.2} depletion={depletion_age:?}"
    );

    SolvencyTimeline {
        event_age,
        years,
        depletion_age,
        solvent,
    }
}

/// Add whole years to a date, falling back to Feb 28 when the shifted
/// date does not exist.
fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year() + years, date.month(), date.day())
        .unwrap_or_else(|| {
            NaiveDate::from_ymd_opt(date.year() + years, date.month(), 28)
                .unwrap_or(date)
        })
}

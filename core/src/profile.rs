//! Caller-supplied input records.
//!
//! These are the plain structured records the surrounding application
//! passes across the in-process boundary: person profile, balances,
//! directives, insurance totals, property parameters, dependents, and
//! per-run rate assumptions. Everything deserializes leniently — advisors
//! run projections against half-complete profiles all the time, and a
//! malformed field must coerce, never crash.

use crate::amortization::outstanding_balance;
use crate::config::RateAssumptions;
use crate::error::EngineResult;
use crate::ledger::{AccountState, WithdrawalDirective};
use crate::types::{clamp_money, lenient_age, lenient_date, lenient_f64, years_between, Age};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Assumed when the profile carries no usable birth date.
pub const DEFAULT_CURRENT_AGE: Age = 30;

/// Assumed when the profile carries no usable retirement age.
pub const DEFAULT_RETIREMENT_AGE: Age = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    #[default]
    Female,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonProfile {
    pub name: String,
    #[serde(deserialize_with = "lenient_date")]
    pub birth_date: Option<NaiveDate>,
    pub gender: Gender,
    #[serde(deserialize_with = "lenient_f64")]
    pub gross_monthly_income: f64,
    #[serde(deserialize_with = "lenient_age")]
    pub target_retirement_age: Age,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dependent {
    pub name: String,
    #[serde(deserialize_with = "lenient_date")]
    pub birth_date: Option<NaiveDate>,
    pub gender: Gender,
}

/// Coverage totals, pre-summed from the client's policy records by the
/// record store.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsuranceCoverage {
    #[serde(deserialize_with = "lenient_f64")]
    pub death: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub disability: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub critical_illness: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyLoan {
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub down_payment_frac: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub annual_rate: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub tenure_years: f64,
    #[serde(deserialize_with = "lenient_age")]
    pub purchase_age: Age,
}

impl PropertyLoan {
    /// Outstanding balance when the owner reaches `event_age`. Elapsed
    /// time is the (possibly negative) gap between the two ages; an event
    /// before purchase reports the full loan amount.
    pub fn outstanding_at_age(&self, event_age: Age) -> f64 {
        let elapsed_years = event_age as f64 - self.purchase_age as f64;
        outstanding_balance(
            self.price,
            self.down_payment_frac,
            self.annual_rate,
            self.tenure_years,
            elapsed_years,
        )
    }
}

/// Everything the record store knows about one client, as handed to the
/// engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientProfile {
    pub person: PersonProfile,
    pub accounts: AccountState,
    #[serde(deserialize_with = "lenient_f64")]
    pub cash: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub investments: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub monthly_savings: f64,
    /// Fraction of monthly savings routed to investments; remainder to cash.
    #[serde(deserialize_with = "lenient_f64")]
    pub invest_fraction: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub monthly_expense: f64,
    pub withdrawals: Vec<WithdrawalDirective>,
    pub dependents: Vec<Dependent>,
    pub insurance: InsuranceCoverage,
    pub property: Option<PropertyLoan>,
    pub rates: RateAssumptions,
}

impl ClientProfile {
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The client's whole-year age, or the documented default when the
    /// profile has no usable birth date.
    pub fn current_age(&self, today: NaiveDate) -> Age {
        self.person
            .birth_date
            .map(|birth| years_between(birth, today))
            .unwrap_or(DEFAULT_CURRENT_AGE)
    }

    /// Assemble one run's immutable inputs from this snapshot.
    pub fn simulation_inputs(&self, today: NaiveDate) -> SimulationInputs {
        SimulationInputs {
            current_age: self.current_age(today),
            retirement_age: self.person.target_retirement_age,
            accounts: self.accounts.clone(),
            cash: self.cash,
            investments: self.investments,
            gross_monthly_income: self.person.gross_monthly_income,
            monthly_savings: self.monthly_savings,
            invest_fraction: self.invest_fraction,
            monthly_expense: self.monthly_expense,
            withdrawals: self.withdrawals.clone(),
            rates: self.rates.clone(),
        }
        .sanitized()
    }
}

/// The immutable input set for one projection run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationInputs {
    #[serde(deserialize_with = "lenient_age")]
    pub current_age: Age,
    #[serde(deserialize_with = "lenient_age")]
    pub retirement_age: Age,
    pub accounts: AccountState,
    #[serde(deserialize_with = "lenient_f64")]
    pub cash: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub investments: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub gross_monthly_income: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub monthly_savings: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub invest_fraction: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub monthly_expense: f64,
    pub withdrawals: Vec<WithdrawalDirective>,
    pub rates: RateAssumptions,
}

impl SimulationInputs {
    /// Repair out-of-range fields to their documented defaults. Applied
    /// once at the head of every projection entry point.
    pub fn sanitized(mut self) -> Self {
        if self.retirement_age == 0 {
            self.retirement_age = DEFAULT_RETIREMENT_AGE;
        }
        self.invest_fraction = if self.invest_fraction.is_finite() {
            self.invest_fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.cash = clamp_money(self.cash);
        self.investments = clamp_money(self.investments);
        self.gross_monthly_income = clamp_money(self.gross_monthly_income);
        self.monthly_savings = clamp_money(self.monthly_savings);
        self.monthly_expense = clamp_money(self.monthly_expense);
        self
    }
}

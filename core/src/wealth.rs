//! Wealth projector — combined net-worth timeline.
//!
//! Runs the account ledger in lock-step with independent monthly
//! compounding of cash and market investments. Below the retirement age,
//! monthly savings capacity splits between the two; from the retirement
//! age on, the decumulation waterfall funds each period's inflated
//! expense in a fixed order:
//!
//!   annuity payout (once active) → cash → investments
//!
//! Whatever remains unmet after investments are exhausted is recorded as
//! that year's shortfall. The liquid side floors at zero — it never goes
//! negative, and no later surplus back-fills a missed period.

use crate::config::PlanConfig;
use crate::event::PlanEvent;
use crate::ledger::{AccountState, LedgerSimulator};
use crate::profile::SimulationInputs;
use crate::types::Age;
use serde::Serialize;

/// One combined balance-sheet snapshot. Owned by exactly one run; the
/// projector evolves it once per period.
#[derive(Debug, Clone, Serialize)]
pub struct WealthState {
    pub cash: f64,
    pub investments: f64,
    pub accounts: AccountState,
    /// Monthly annuity rate; 0 until activation.
    pub annuity_monthly: f64,
}

impl WealthState {
    pub fn net_worth(&self) -> f64 {
        self.cash + self.investments + self.accounts.total()
    }
}

/// One row per simulated year. Immutable once emitted.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProjectionPoint {
    pub age: Age,
    pub ordinary: f64,
    pub special: f64,
    pub medisave: f64,
    pub retirement: f64,
    pub cash: f64,
    pub investments: f64,
    pub net_worth: f64,
    /// The year's inflated annual expense baseline.
    pub annual_expense: f64,
    /// True if any period this year could not be fully funded.
    pub shortfall: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WealthProjection {
    pub points: Vec<ProjectionPoint>,
    pub events: Vec<PlanEvent>,
    /// Net worth at the retirement-age checkpoint.
    pub retirement_net_worth: f64,
    pub terminal_net_worth: f64,
    /// Terminal net worth minus the starting total.
    pub total_growth: f64,
}

/// Deterministic projection under the mean investment return.
pub fn project(inputs: &SimulationInputs, config: &PlanConfig) -> WealthProjection {
    project_with_returns(inputs, config, None)
}

/// Projection with an optional per-year investment-return path. This is
/// the reduced form the Monte Carlo sampler re-runs: only the investment
/// leg varies, every other leg is identical across passes.
pub fn project_with_returns(
    inputs: &SimulationInputs,
    config: &PlanConfig,
    year_returns: Option<&[f64]>,
) -> WealthProjection {
    let inputs = inputs.clone().sanitized();
    let horizon_age = config.horizon_age.max(inputs.current_age + 1);
    let total_months = (horizon_age - inputs.current_age) * 12;

    let mut ledger = LedgerSimulator::new(
        inputs.current_age,
        inputs.accounts.clone(),
        inputs.gross_monthly_income,
        inputs.withdrawals.clone(),
        inputs.rates.clone(),
        config,
    );
    let mut state = WealthState {
        cash: inputs.cash,
        investments: inputs.investments,
        accounts: ledger.accounts().clone(),
        annuity_monthly: 0.0,
    };
    let initial_total = state.net_worth();

    let cash_factor = monthly_factor(inputs.rates.cash);
    let savings_to_invest = inputs.monthly_savings * inputs.invest_fraction;
    let savings_to_cash = inputs.monthly_savings - savings_to_invest;

    let mut points: Vec<ProjectionPoint> = Vec::with_capacity((total_months / 12) as usize);
    let mut events: Vec<PlanEvent> = Vec::new();
    let mut year_shortfall = false;
    let mut depletion_reported = false;

    for month in 0..total_months {
        let years_elapsed = month / 12;
        let age = inputs.current_age + years_elapsed;
        let annual_return = year_returns
            .and_then(|path| path.get(years_elapsed as usize).copied())
            .unwrap_or(inputs.rates.investment);

        ledger.step_month();
        state.cash *= cash_factor;
        state.investments *= monthly_factor(annual_return);

        let monthly_expense = inputs.monthly_expense
            * (1.0 + inputs.rates.inflation).powi(years_elapsed as i32);

        if age < inputs.retirement_age {
            state.cash += savings_to_cash;
            state.investments += savings_to_invest;
        } else {
            let mut unmet = (monthly_expense - ledger.annuity_monthly()).max(0.0);
            let from_cash = unmet.min(state.cash);
            state.cash -= from_cash;
            unmet -= from_cash;
            let from_investments = unmet.min(state.investments);
            state.investments -= from_investments;
            unmet -= from_investments;
            if unmet > 0.0 {
                year_shortfall = true;
                if !depletion_reported {
                    depletion_reported = true;
                    events.push(PlanEvent::WealthDepleted {
                        age,
                        unmet_monthly_expense: unmet,
                    });
                }
            }
        }

        state.accounts = ledger.accounts().clone();
        state.annuity_monthly = ledger.annuity_monthly();
        events.extend(ledger.drain_events());

        // Emit the year's row on its last period.
        if month % 12 == 11 {
            points.push(ProjectionPoint {
                age,
                ordinary: state.accounts.ordinary,
                special: state.accounts.special,
                medisave: state.accounts.medisave,
                retirement: state.accounts.retirement,
                cash: state.cash,
                investments: state.investments,
                net_worth: state.net_worth(),
                annual_expense: monthly_expense * 12.0,
                shortfall: year_shortfall,
            });
            year_shortfall = false;
        }
    }

    let terminal_net_worth = points.last().map(|p| p.net_worth).unwrap_or(initial_total);
    let retirement_net_worth = points
        .iter()
        .find(|p| p.age >= inputs.retirement_age)
        .map(|p| p.net_worth)
        .unwrap_or(terminal_net_worth);

    log::debug!(
        "projection complete: {} points, retirement={retirement_net_worth:.0}, \
         terminal={terminal_net_worth:.0}",
        points.len()
    );

    WealthProjection {
        points,
        events,
        retirement_net_worth,
        terminal_net_worth,
        total_growth: terminal_net_worth - initial_total,
    }
}

/// Monthly compounding factor for an annual rate. Annual losses clamp
/// above total wipeout so the factor stays positive.
fn monthly_factor(annual_rate: f64) -> f64 {
    (1.0 + annual_rate.max(-0.99)).powf(1.0 / 12.0)
}

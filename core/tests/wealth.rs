//! Wealth projector tests — combined timeline and decumulation waterfall.

use planwise_core::config::{PlanConfig, RateAssumptions};
use planwise_core::event::PlanEvent;
use planwise_core::profile::SimulationInputs;
use planwise_core::wealth::project;

fn flat_rates() -> RateAssumptions {
    RateAssumptions {
        ordinary: 0.0,
        savings: 0.0,
        cash: 0.0,
        investment: 0.0,
        inflation: 0.0,
    }
}

fn retiree_inputs() -> SimulationInputs {
    SimulationInputs {
        current_age: 66,
        retirement_age: 65,
        cash: 10_000.0,
        investments: 5_000.0,
        monthly_expense: 1_000.0,
        rates: flat_rates(),
        ..SimulationInputs::default()
    }
}

/// Expenses drain cash before touching investments.
#[test]
fn waterfall_draws_cash_before_investments() {
    let projection = project(&retiree_inputs(), &PlanConfig::default());
    let first_year = &projection.points[0];

    // 12 months at 1,000: the first 10 from cash, the last 2 from
    // investments.
    assert!(
        first_year.cash.abs() < 1e-6,
        "cash should be exhausted first, got {}",
        first_year.cash
    );
    assert!(
        (first_year.investments - 3_000.0).abs() < 1e-6,
        "investments should cover only the residue, got {}",
        first_year.investments
    );
    assert!(!first_year.shortfall, "year one is fully funded");
}

/// Once everything is exhausted the shortfall flag raises and the liquid
/// side stays at zero — it never goes negative.
#[test]
fn exhaustion_flags_shortfall_and_floors_at_zero() {
    let projection = project(&retiree_inputs(), &PlanConfig::default());

    let depleted_year = projection
        .points
        .iter()
        .find(|p| p.shortfall)
        .expect("15 months of funding cannot cover 24 years");
    assert_eq!(depleted_year.age, 67, "funds last 15 months from age 66");

    for point in &projection.points {
        assert!(point.cash >= 0.0, "cash negative at age {}", point.age);
        assert!(
            point.investments >= 0.0,
            "investments negative at age {}",
            point.age
        );
    }

    let depletion_events = projection
        .events
        .iter()
        .filter(|e| matches!(e, PlanEvent::WealthDepleted { .. }))
        .count();
    assert_eq!(depletion_events, 1, "depletion is reported exactly once");
}

/// An active annuity offsets expenses before any liquid draw.
#[test]
fn annuity_offsets_expense_before_cash() {
    let mut inputs = retiree_inputs();
    // A retirement balance large enough that the age-65/66 annuitization
    // payout covers the whole 1,000 expense.
    inputs.accounts.retirement = 200_000.0;
    let projection = project(&inputs, &PlanConfig::default());
    let first_year = &projection.points[0];

    assert!(
        (first_year.cash - 10_000.0).abs() < 1e-6,
        "cash untouched while the annuity covers expenses, got {}",
        first_year.cash
    );
}

/// While accumulating, savings split between cash and investments by the
/// configured fraction.
#[test]
fn savings_split_by_invest_fraction() {
    let inputs = SimulationInputs {
        current_age: 30,
        retirement_age: 65,
        monthly_savings: 1_000.0,
        invest_fraction: 0.25,
        rates: flat_rates(),
        ..SimulationInputs::default()
    };
    let projection = project(&inputs, &PlanConfig::default());
    let first_year = &projection.points[0];

    assert!((first_year.cash - 9_000.0).abs() < 1e-6);
    assert!((first_year.investments - 3_000.0).abs() < 1e-6);
}

/// Net worth at the retirement checkpoint exceeds the start for a steady
/// saver with no withdrawals.
#[test]
fn saver_grows_to_retirement() {
    let inputs = SimulationInputs {
        current_age: 30,
        retirement_age: 65,
        gross_monthly_income: 5_000.0,
        monthly_savings: 1_000.0,
        invest_fraction: 0.5,
        monthly_expense: 2_000.0,
        ..SimulationInputs::default()
    };
    let projection = project(&inputs, &PlanConfig::default());

    assert!(
        projection.retirement_net_worth > 0.0,
        "checkpoint should be positive"
    );
    let at_30 = projection.points.first().unwrap();
    let at_54 = projection.points.iter().find(|p| p.age == 54).unwrap();
    assert!(
        at_54.ordinary > at_30.ordinary,
        "ordinary at 54 ({}) must exceed age 30 ({})",
        at_54.ordinary,
        at_30.ordinary
    );
}

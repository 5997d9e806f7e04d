//! Life-event analyzer tests — capital needs and solvency timelines.

use chrono::NaiveDate;
use planwise_core::config::PlanConfig;
use planwise_core::life_event::{analyze, LifeEventOutcome, LifeEventScenario};
use planwise_core::profile::{ClientProfile, PersonProfile};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
}

fn person(age: i32, income: f64) -> PersonProfile {
    PersonProfile {
        name: "client".into(),
        birth_date: NaiveDate::from_ymd_opt(2026 - age, 1, 1),
        gross_monthly_income: income,
        target_retirement_age: 65,
        ..PersonProfile::default()
    }
}

/// The documented surplus scenario: no mortgage, no dependents, and a
/// payout far beyond 20 years of 70%-of-expense support plus the final
/// expense allowance.
#[test]
fn well_insured_death_reports_surplus() {
    let mut profile = ClientProfile {
        person: person(40, 5_000.0),
        monthly_expense: 3_000.0,
        ..ClientProfile::default()
    };
    profile.insurance.death = 1_000_000.0;

    let scenario = LifeEventScenario::Death {
        event_age: 45,
        support_years: 20,
        final_expense: 15_000.0,
    };
    let LifeEventOutcome::CapitalNeeds(report) = analyze(&scenario, &profile, today(), &PlanConfig::default())
    else {
        panic!("death scenario must produce a capital-needs report");
    };

    // Support: 0.7 * 3,000 * 12 * 20 = 504,000; plus 15,000 final expense.
    assert!((report.family_support_liability - 504_000.0).abs() < 1e-6);
    assert_eq!(report.mortgage_liability, 0.0);
    assert_eq!(report.education_liability, 0.0);
    assert!(
        report.surplus && report.gap > 0.0,
        "1M payout against {:.0} of liabilities must be a surplus",
        report.total_liabilities
    );
}

/// Dependents and an outstanding mortgage both surface as liabilities.
#[test]
fn death_liabilities_include_mortgage_and_education() {
    let mut profile = ClientProfile {
        person: person(40, 5_000.0),
        monthly_expense: 3_000.0,
        ..ClientProfile::default()
    };
    profile.dependents.push(planwise_core::profile::Dependent {
        name: "child".into(),
        birth_date: NaiveDate::from_ymd_opt(2019, 3, 1),
        ..Default::default()
    });
    profile.property = Some(planwise_core::profile::PropertyLoan {
        price: 500_000.0,
        down_payment_frac: 0.25,
        annual_rate: 0.035,
        tenure_years: 25.0,
        purchase_age: 35,
    });

    let scenario = LifeEventScenario::Death {
        event_age: 45,
        support_years: 10,
        final_expense: 15_000.0,
    };
    let LifeEventOutcome::CapitalNeeds(report) = analyze(&scenario, &profile, today(), &PlanConfig::default())
    else {
        panic!("death scenario must produce a capital-needs report");
    };

    assert!(
        report.mortgage_liability > 0.0 && report.mortgage_liability < 375_000.0,
        "10 elapsed years leaves a partial balance, got {}",
        report.mortgage_liability
    );
    assert!(report.education_liability > 0.0, "child still has schooling ahead");
    assert!(!report.surplus, "uninsured with debts should be a shortfall");
}

/// The documented insolvency scenario: no payout, no liquid assets,
/// elevated expenses — depletion lands on the event age itself.
#[test]
fn uninsured_disability_depletes_immediately() {
    let profile = ClientProfile {
        person: person(40, 5_000.0),
        monthly_expense: 3_000.0,
        ..ClientProfile::default()
    };

    let scenario = LifeEventScenario::Disability {
        event_age: 45,
        expense_factor: 1.2,
    };
    let LifeEventOutcome::Solvency(timeline) = analyze(&scenario, &profile, today(), &PlanConfig::default())
    else {
        panic!("disability scenario must produce a solvency timeline");
    };

    assert_eq!(
        timeline.depletion_age,
        Some(45),
        "zero assets and zero payout must be insolvent at the event age"
    );
    assert!(!timeline.solvent);
}

/// A disability payout buys years of runway before depletion.
#[test]
fn disability_payout_delays_depletion() {
    let mut profile = ClientProfile {
        person: person(40, 5_000.0),
        monthly_expense: 3_000.0,
        ..ClientProfile::default()
    };
    profile.insurance.disability = 200_000.0;

    let scenario = LifeEventScenario::Disability {
        event_age: 45,
        expense_factor: 1.2,
    };
    let LifeEventOutcome::Solvency(timeline) = analyze(&scenario, &profile, today(), &PlanConfig::default())
    else {
        panic!("disability scenario must produce a solvency timeline");
    };

    let depletion = timeline.depletion_age.expect("200k cannot fund 45 years");
    assert!(
        depletion > 45,
        "payout should delay depletion past the event age, got {depletion}"
    );
}

/// Critical illness restores income after the recovery window; disability
/// never does.
#[test]
fn illness_income_restores_after_recovery_years() {
    let mut profile = ClientProfile {
        person: person(40, 5_000.0),
        monthly_expense: 3_000.0,
        cash: 250_000.0,
        ..ClientProfile::default()
    };
    profile.insurance.critical_illness = 50_000.0;

    let scenario = LifeEventScenario::CriticalIllness {
        event_age: 45,
        expense_factor: 1.3,
        recovery_years: 3,
    };
    let LifeEventOutcome::Solvency(timeline) = analyze(&scenario, &profile, today(), &PlanConfig::default())
    else {
        panic!("illness scenario must produce a solvency timeline");
    };

    let by_age = |age: u32| timeline.years.iter().find(|y| y.age == age);
    assert_eq!(by_age(45).unwrap().income, 0.0, "no income during recovery");
    assert_eq!(by_age(47).unwrap().income, 0.0, "recovery window is 3 years");
    assert_eq!(
        by_age(48).unwrap().income,
        60_000.0,
        "income restores 3 years after the event"
    );
}

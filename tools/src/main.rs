//! plan-runner: headless projection runner for the planning engine.
//!
//! Usage:
//!   plan-runner --profile client.json --seed 42 --passes 500
//!   plan-runner --config assumptions.json --event-age 45
//!
//! With no --profile a built-in sample profile is used. Prints the
//! deterministic projection summary, Monte Carlo band checkpoints, and
//! the three life-event scenario verdicts.

use anyhow::Result;
use planwise_core::{
    config::PlanConfig,
    life_event::{analyze, LifeEventOutcome, LifeEventScenario},
    monte_carlo::sample_bands,
    profile::ClientProfile,
    wealth::project,
};
use std::env;
use std::fs;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let passes = parse_arg(&args, "--passes", 0usize);
    let event_age_override = parse_arg(&args, "--event-age", 0u32);
    let profile_path = args
        .windows(2)
        .find(|w| w[0] == "--profile")
        .map(|w| w[1].as_str());
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());

    let config = match config_path {
        Some(path) => PlanConfig::from_json(&fs::read_to_string(path)?)?,
        None => PlanConfig::default(),
    };
    let profile = match profile_path {
        Some(path) => ClientProfile::from_json(&fs::read_to_string(path)?)?,
        None => sample_profile(),
    };
    let passes = if passes == 0 {
        config.monte_carlo.default_passes
    } else {
        passes
    };

    let today = chrono_today();
    let current_age = profile.current_age(today);
    let inputs = profile.simulation_inputs(today);

    println!("planwise — plan-runner");
    println!("  profile:  {}", profile_path.unwrap_or("(built-in sample)"));
    println!("  age:      {current_age} → retire {}", inputs.retirement_age);
    println!("  seed:     {seed}");
    println!("  passes:   {passes}");
    println!();

    // ── Deterministic projection ───────────────────────────────
    let projection = project(&inputs, &config);
    println!("=== PROJECTION SUMMARY ===");
    println!("  net worth at retirement: {:>12.0}", projection.retirement_net_worth);
    println!("  terminal net worth:      {:>12.0}", projection.terminal_net_worth);
    println!("  total growth:            {:>12.0}", projection.total_growth);
    for event in &projection.events {
        println!("  event: {}", serde_json::to_string(event)?);
    }
    let first_shortfall = projection.points.iter().find(|p| p.shortfall);
    match first_shortfall {
        Some(p) => println!("  first shortfall year:    age {}", p.age),
        None => println!("  first shortfall year:    none"),
    }

    // ── Monte Carlo bands ──────────────────────────────────────
    let bands = sample_bands(&inputs, &config, passes, seed);
    println!();
    println!("=== MONTE CARLO ({} passes) ===", bands.passes);
    for checkpoint in [inputs.retirement_age, config.horizon_age - 1] {
        if let Some(i) = bands.ages.iter().position(|&a| a == checkpoint) {
            println!(
                "  age {:>3} | p10: {:>12.0} | p50: {:>12.0} | p90: {:>12.0}",
                checkpoint, bands.pessimistic[i], bands.median[i], bands.optimistic[i]
            );
        }
    }

    // ── Life-event scenarios ───────────────────────────────────
    let event_age = if event_age_override > 0 {
        event_age_override
    } else {
        current_age + 10
    };
    let scenarios = [
        LifeEventScenario::Death {
            event_age,
            support_years: config.life_event.default_support_years,
            final_expense: config.life_event.default_final_expense,
        },
        LifeEventScenario::Disability {
            event_age,
            expense_factor: 1.2,
        },
        LifeEventScenario::CriticalIllness {
            event_age,
            expense_factor: 1.3,
            recovery_years: 5,
        },
    ];

    println!();
    println!("=== LIFE-EVENT SCENARIOS (event age {event_age}) ===");
    for scenario in &scenarios {
        match analyze(scenario, &profile, today, &config) {
            LifeEventOutcome::CapitalNeeds(report) => {
                println!(
                    "  death           | gap: {:>12.0} | {}",
                    report.gap,
                    if report.surplus { "surplus" } else { "SHORTFALL" }
                );
            }
            LifeEventOutcome::Solvency(timeline) => {
                let label = match scenario {
                    LifeEventScenario::Disability { .. } => "disability",
                    _ => "critical illness",
                };
                match timeline.depletion_age {
                    Some(age) => println!("  {label:<15} | depletes at age {age}"),
                    None => println!("  {label:<15} | solvent through horizon"),
                }
            }
        }
    }

    Ok(())
}

/// A plausible mid-career client for demonstration runs.
fn sample_profile() -> ClientProfile {
    let json = r#"{
        "person": {
            "name": "Sample Client",
            "birth_date": "1990-06-15",
            "gender": "male",
            "gross_monthly_income": 5500,
            "target_retirement_age": 65
        },
        "accounts": { "ordinary": 60000, "special": 25000, "medisave": 30000 },
        "cash": 40000,
        "investments": 25000,
        "monthly_savings": 1500,
        "invest_fraction": 0.5,
        "monthly_expense": 3000,
        "dependents": [
            { "name": "Child", "birth_date": "2019-03-01", "gender": "female" }
        ],
        "insurance": { "death": 300000, "disability": 150000, "critical_illness": 100000 },
        "property": {
            "price": 500000,
            "down_payment_frac": 0.25,
            "annual_rate": 0.035,
            "tenure_years": 25,
            "purchase_age": 30
        }
    }"#;
    ClientProfile::from_json(json).expect("built-in sample profile parses")
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn chrono_today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

//! Monte Carlo return sampler — percentile bands over the projection.
//!
//! Re-runs the reduced wealth projection N times with a randomized
//! per-year investment return (mean + sigma * Z, Z standard normal via
//! Box–Muller). The ledger, cash, and expense legs stay deterministic and
//! identical across passes; only the investment leg moves. Per simulated
//! year the pass values sort and the 10th / 50th / 90th percentiles form
//! the pessimistic / median / optimistic bands, aligned to the same age
//! axis as a single deterministic run.
//!
//! Passes run sequentially and are individually cheap. Cancellation is
//! supported only between passes — `sample_bands_while` stops before
//! starting the next pass once the caller's predicate says so.

use crate::config::PlanConfig;
use crate::profile::SimulationInputs;
use crate::rng::PlanRng;
use crate::types::Age;
use crate::wealth::project_with_returns;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PercentileBands {
    pub ages: Vec<Age>,
    /// 10th percentile of net worth per year.
    pub pessimistic: Vec<f64>,
    /// 50th percentile of net worth per year.
    pub median: Vec<f64>,
    /// 90th percentile of net worth per year.
    pub optimistic: Vec<f64>,
    /// Passes actually completed (equals the request unless cancelled).
    pub passes: usize,
}

/// Run `passes` simulation passes seeded from `master_seed`.
pub fn sample_bands(
    inputs: &SimulationInputs,
    config: &PlanConfig,
    passes: usize,
    master_seed: u64,
) -> PercentileBands {
    sample_bands_while(inputs, config, passes, master_seed, || true)
}

/// As `sample_bands`, but checks `keep_going` before each pass after the
/// first and stops early when it returns false.
pub fn sample_bands_while(
    inputs: &SimulationInputs,
    config: &PlanConfig,
    passes: usize,
    master_seed: u64,
    mut keep_going: impl FnMut() -> bool,
) -> PercentileBands {
    let inputs = inputs.clone().sanitized();
    let passes = passes.max(1);
    let horizon_age = config.horizon_age.max(inputs.current_age + 1);
    let years = (horizon_age - inputs.current_age) as usize;

    let mut per_year: Vec<Vec<f64>> = vec![Vec::with_capacity(passes); years];
    let mut completed = 0usize;

    for pass in 0..passes {
        if pass > 0 && !keep_going() {
            log::info!("monte carlo cancelled after {completed} of {passes} passes");
            break;
        }
        let mut rng = PlanRng::new(master_seed, pass as u64);
        let returns: Vec<f64> = (0..years)
            .map(|_| {
                rng.annual_return(inputs.rates.investment, config.monte_carlo.volatility)
            })
            .collect();

        let projection = project_with_returns(&inputs, config, Some(&returns));
        for (year, point) in projection.points.iter().enumerate() {
            per_year[year].push(point.net_worth);
        }
        completed += 1;
    }

    let mut bands = PercentileBands {
        ages: (inputs.current_age..horizon_age).collect(),
        pessimistic: Vec::with_capacity(years),
        median: Vec::with_capacity(years),
        optimistic: Vec::with_capacity(years),
        passes: completed,
    };
    for values in &mut per_year {
        values.sort_by(|a, b| a.total_cmp(b));
        bands.pessimistic.push(percentile(values, 0.10));
        bands.median.push(percentile(values, 0.50));
        bands.optimistic.push(percentile(values, 0.90));
    }
    bands
}

/// Value at index floor(N * p) of an ascending-sorted slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let index = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[index]
}

//! Deterministic random number generation.
//!
//! RULE: Nothing in the engine may call any platform RNG.
//! All randomness flows through PlanRng instances derived from the single
//! master seed the caller supplies to a Monte Carlo run.
//!
//! Each simulation pass gets its own RNG stream, seeded deterministically
//! from (master_seed XOR pass_index). This means:
//!   - Reordering or skipping passes never perturbs other passes' draws.
//!   - Any single pass is fully reproducible in isolation.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A deterministic RNG stream for one simulation pass.
pub struct PlanRng {
    inner: Pcg64Mcg,
    /// Second Box–Muller deviate, held for the next gaussian() call.
    spare: Option<f64>,
}

impl PlanRng {
    /// Create a pass RNG from the master seed and a stable pass index.
    pub fn new(master_seed: u64, pass_index: u64) -> Self {
        let derived_seed = master_seed ^ (pass_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
            spare: None,
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a standard-normal deviate via the Box–Muller transform.
    /// Generates two deviates per trip through the transform and caches
    /// the second.
    pub fn gaussian(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        // u1 bounded away from 0 so ln() stays finite.
        let u1 = self.next_f64().max(1e-12);
        let u2 = self.next_f64();
        let radius = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * std::f64::consts::PI * u2;
        self.spare = Some(radius * theta.sin());
        radius * theta.cos()
    }

    /// Draw an annual return as mean + sigma * Z.
    pub fn annual_return(&mut self, mean: f64, sigma: f64) -> f64 {
        mean + sigma * self.gaussian()
    }
}

//! planwise-core — the financial-planning calculation engine.
//!
//! A pure, synchronous projection library: it consumes plain numeric and
//! dated inputs (client profile snapshots) and returns plain numeric series.
//! No I/O, no persistence, no shared mutable state. Storage, authentication,
//! rendering, and report generation are the surrounding application's job.
//!
//! RULES:
//!   - Projection functions never fail. Malformed numeric input coerces to
//!     a documented default; balances clamp at zero instead of going
//!     negative. `EngineError` exists only for the JSON boundary.
//!   - All randomness flows through `rng::PlanRng`, seeded by the caller.
//!     Nothing in the engine may call a platform RNG.
//!   - Period processing in the ledger is an explicit ordered pipeline.
//!     The order is documented in `ledger.rs` and never reordered.

pub mod amortization;
pub mod clock;
pub mod config;
pub mod contribution;
pub mod education;
pub mod error;
pub mod event;
pub mod ledger;
pub mod life_event;
pub mod monte_carlo;
pub mod profile;
pub mod rates;
pub mod rng;
pub mod types;
pub mod wealth;

//! Declining-balance loan amortization.
//!
//! Standard fixed-rate mortgage math on a monthly schedule:
//!   balance(p) = L * [(1+r)^n - (1+r)^p] / [(1+r)^n - 1]
//! with r the monthly rate, n the total months, p the elapsed months.
//! The r = 0 degenerate case reduces to straight-line.

use crate::types::clamp_money;

/// Outstanding balance after `elapsed_years` (may be fractional, derived
/// from two ages).
///
/// - elapsed >= tenure ⇒ 0 (fully repaid)
/// - elapsed < 0       ⇒ the full loan amount (event predates origination;
///                       the loan has not started amortizing)
pub fn outstanding_balance(
    price: f64,
    down_payment_frac: f64,
    annual_rate: f64,
    tenure_years: f64,
    elapsed_years: f64,
) -> f64 {
    let price = clamp_money(price);
    let down = down_payment_frac.clamp(0.0, 1.0);
    let loan = price * (1.0 - down);
    let tenure = tenure_years.max(0.0);

    if loan <= 0.0 || tenure <= 0.0 || elapsed_years >= tenure {
        return 0.0;
    }
    if elapsed_years < 0.0 {
        return loan;
    }

    let total_months = tenure * 12.0;
    let elapsed_months = elapsed_years * 12.0;
    let monthly_rate = annual_rate.max(0.0) / 12.0;

    if monthly_rate == 0.0 {
        // Straight-line reduction.
        return loan * (1.0 - elapsed_months / total_months);
    }

    let growth_full = (1.0 + monthly_rate).powf(total_months);
    let growth_elapsed = (1.0 + monthly_rate).powf(elapsed_months);
    (loan * (growth_full - growth_elapsed) / (growth_full - 1.0)).max(0.0)
}

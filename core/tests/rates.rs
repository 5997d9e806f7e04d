//! Statutory rate-table invariants.

use planwise_core::rates::{allocation_shares, contribution_rates, rates_are_consistent, AgeRateProfile};

/// For every age, employee + employer equals the band total and the three
/// allocation shares sum to that same total.
#[test]
fn allocation_accounts_for_full_contribution_at_every_age() {
    for age in 0..=80 {
        assert!(
            rates_are_consistent(age),
            "rate tables inconsistent at age {age}"
        );
    }
}

#[test]
fn contribution_bands_match_documented_totals() {
    assert_eq!(contribution_rates(30), (0.20, 0.17));
    assert_eq!(contribution_rates(55), (0.20, 0.17));
    assert_eq!(contribution_rates(56), (0.13, 0.13));
    assert_eq!(contribution_rates(63), (0.075, 0.09));
    assert_eq!(contribution_rates(70), (0.05, 0.075));
}

#[test]
fn allocation_bands_step_down_with_age() {
    assert_eq!(allocation_shares(30), (0.23, 0.06, 0.08));
    assert_eq!(allocation_shares(40), (0.21, 0.07, 0.09));
    assert_eq!(allocation_shares(53), (0.15, 0.115, 0.105));
    assert_eq!(allocation_shares(67), (0.01, 0.01, 0.105));
}

/// Band edges are contiguous — no age falls between bands.
#[test]
fn bands_are_contiguous_across_edges() {
    for age in [35, 36, 45, 46, 50, 51, 55, 56, 60, 61, 65, 66] {
        let p = AgeRateProfile::for_age(age);
        assert!(p.total() > 0.0, "no band covers age {age}");
    }
}

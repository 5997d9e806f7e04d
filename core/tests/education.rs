//! Education cost calculator tests.

use chrono::NaiveDate;
use planwise_core::config::EducationConfig;
use planwise_core::education::remaining_education_cost;
use planwise_core::profile::Gender;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
}

fn born_years_ago(years: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2026 - years, 1, 1)
}

/// A 7-year-old has more schooling left to fund than a 17-year-old.
#[test]
fn younger_dependent_costs_strictly_more() {
    let config = EducationConfig::default();
    let cost_at_7 = remaining_education_cost(born_years_ago(7), Gender::Female, today(), &config);
    let cost_at_17 = remaining_education_cost(born_years_ago(17), Gender::Female, today(), &config);

    assert!(cost_at_7 > 0.0, "age 7 cost must be positive");
    assert!(cost_at_17 > 0.0, "age 17 still has university ahead");
    assert!(
        cost_at_7 > cost_at_17,
        "age 7 ({cost_at_7}) should cost more than age 17 ({cost_at_17})"
    );
}

#[test]
fn no_birth_date_costs_nothing() {
    let config = EducationConfig::default();
    assert_eq!(remaining_education_cost(None, Gender::Male, today(), &config), 0.0);
}

/// Past both stages there is nothing left to fund. A 30-year-old male is
/// beyond schooling (7–19) and university (21–25).
#[test]
fn dependent_past_both_stages_costs_nothing() {
    let config = EducationConfig::default();
    let cost = remaining_education_cost(born_years_ago(30), Gender::Male, today(), &config);
    assert_eq!(cost, 0.0);
}

/// The national-service offset delays university for males, which pushes
/// those years further out and inflates them more.
#[test]
fn male_university_years_inflate_further_out() {
    let config = EducationConfig::default();
    // Age 20: a female (university 19-23) is already one year in; a male
    // (university 21-25) still has all four years ahead.
    let male = remaining_education_cost(born_years_ago(20), Gender::Male, today(), &config);
    let female = remaining_education_cost(born_years_ago(20), Gender::Female, today(), &config);
    assert!(
        male > female,
        "male at 20 ({male}) should owe more remaining university than female ({female})"
    );
}

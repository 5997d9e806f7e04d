//! Remaining education cost for a dependent.
//!
//! Two non-overlapping stages: schooling from the configured start age,
//! then university. University starts after schooling, pushed back by the
//! national-service offset for male dependents. Each stage year not yet
//! reached accrues that year's cost inflated from today:
//!   yearly_cost * (1 + inflation)^(years until that year).

use crate::config::EducationConfig;
use crate::profile::Gender;
use crate::types::{years_between, Age};
use chrono::NaiveDate;

/// Total inflated cost of the dependent's remaining stage years.
/// Returns 0 with no valid birth date or once both stages are behind them.
pub fn remaining_education_cost(
    birth_date: Option<NaiveDate>,
    gender: Gender,
    today: NaiveDate,
    config: &EducationConfig,
) -> f64 {
    let Some(birth) = birth_date else {
        return 0.0;
    };
    let current_age = years_between(birth, today);

    let schooling_yearly = config.monthly_schooling_cost.max(0.0) * 12.0;
    let schooling_start = config.schooling_start_age;
    let schooling_end = schooling_start + config.schooling_years;

    let university_start = schooling_end
        + match gender {
            Gender::Male => config.male_university_offset,
            Gender::Female => 0,
        };
    let university_end = university_start + config.university_years;

    stage_cost(current_age, schooling_start, schooling_end, schooling_yearly, config.inflation)
        + stage_cost(
            current_age,
            university_start,
            university_end,
            config.university_annual_cost.max(0.0),
            config.inflation,
        )
}

/// Sum the inflated yearly costs for the stage years still ahead of
/// `current_age`. Stage ages run [start, end).
fn stage_cost(current_age: Age, start: Age, end: Age, yearly_cost: f64, inflation: f64) -> f64 {
    let mut total = 0.0;
    for stage_age in start..end {
        if stage_age < current_age {
            continue;
        }
        let years_out = (stage_age - current_age) as f64;
        total += yearly_cost * (1.0 + inflation).powf(years_out);
    }
    total
}

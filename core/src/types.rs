//! Shared primitive types and lenient input coercion.
//!
//! RULE: Every caller-facing input record deserializes through the lenient
//! helpers below. A partially-completed client profile must never crash a
//! projection — malformed numbers become 0, malformed dates become None.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};

/// An age in whole years.
pub type Age = u32;

/// A simulation period. One period = one simulated month.
pub type MonthIndex = u32;

/// Coerce a possibly-malformed numeric field to `f64`.
///
/// Accepts a JSON number, a numeric string ("4500", "4500.50"), or
/// null/absent. Anything unparseable (including NaN and infinities)
/// resolves to 0.0.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
        // Bools, arrays, objects, null — all coerce to the default.
        Anything(serde::de::IgnoredAny),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Num(n) => n,
        Raw::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Raw::Anything(_) => 0.0,
    };
    Ok(if value.is_finite() { value } else { 0.0 })
}

/// Coerce a possibly-malformed age field. Unparseable or out-of-range
/// values resolve to 0, which downstream code treats as "not supplied"
/// and replaces with the simulation's current age.
pub fn lenient_age<'de, D>(deserializer: D) -> Result<Age, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?;
    if (0.0..=130.0).contains(&value) {
        Ok(value as Age)
    } else {
        Ok(0)
    }
}

/// Coerce a possibly-malformed date field to `Option<NaiveDate>`.
/// Accepts "YYYY-MM-DD"; anything else resolves to None.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Anything(serde::de::IgnoredAny),
    }

    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Raw::Text(s)) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
        _ => None,
    })
}

/// Clamp a monetary amount to the non-negative, finite range.
pub fn clamp_money(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Whole years between two dates, floored. Returns 0 if `later` precedes
/// `earlier`.
pub fn years_between(earlier: NaiveDate, later: NaiveDate) -> Age {
    if later < earlier {
        return 0;
    }
    let mut years = later.year() - earlier.year();
    if (later.month(), later.day()) < (earlier.month(), earlier.day()) {
        years -= 1;
    }
    years.max(0) as Age
}

//! Field rules shared by the create form and the inline editor.

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};

use crate::employee::{EmployeeField, EmployeeFields};

/// Source of "today" for future-date checks.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Parses strictly `YYYY-MM-DD` with zero-padded parts.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// A valid ISO date that is not after `today`.
pub fn is_past_or_present_date(value: &str, today: NaiveDate) -> bool {
    parse_iso_date(value).is_some_and(|date| date <= today)
}

/// Inline edit rules: every field non-blank, date fields well-formed and not
/// in the future. Returns exactly the failing fields.
pub fn invalid_edit_fields(
    fields: &EmployeeFields,
    today: NaiveDate,
) -> BTreeSet<EmployeeField> {
    fields
        .iter()
        .filter(|(field, value)| {
            is_blank(value) || (field.is_date() && !is_past_or_present_date(value, today))
        })
        .map(|(field, _)| field)
        .collect()
}

//! The "Create Employee" form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    employee::{EmployeeField, EmployeeFields},
    error::{HrError, HrResult},
    reference::ReferenceData,
    validation::{is_blank, parse_iso_date},
};

/// Earliest date the date pickers offer.
pub fn min_form_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1920, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Convert a picker date (`MM/DD/YYYY`) to `YYYY-MM-DD`.
///
/// ISO input is passed through. Anything else, including impossible calendar
/// dates, becomes an empty string so the required-field check rejects it.
pub fn convert_to_iso(raw: &str) -> String {
    let raw = raw.trim();
    if let Some(date) = parse_iso_date(raw) {
        return date.format("%Y-%m-%d").to_string();
    }
    let mut parts = raw.split('/');
    let (Some(month), Some(day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return String::new();
    };
    let parsed = (
        month.trim().parse::<u32>(),
        day.trim().parse::<u32>(),
        year.trim().parse::<i32>(),
    );
    match parsed {
        (Ok(month), Ok(day), Ok(year)) => NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Raw form input, one string per control.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewEmployeeForm {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub start_date: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub department: String,
}

impl NewEmployeeForm {
    /// Normalize and validate the form. On failure every offending field is
    /// reported, in column order.
    pub fn submit(&self, reference: &ReferenceData, today: NaiveDate) -> HrResult<EmployeeFields> {
        let fields = EmployeeFields {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            date_of_birth: convert_to_iso(&self.date_of_birth),
            start_date: convert_to_iso(&self.start_date),
            street: self.street.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            zip_code: self.zip_code.trim().to_string(),
            department: self.department.trim().to_string(),
        };

        let invalid: Vec<EmployeeField> = fields
            .iter()
            .filter(|(field, value)| !is_acceptable(*field, value, reference, today))
            .map(|(field, _)| field)
            .collect();
        if invalid.is_empty() {
            Ok(fields)
        } else {
            Err(HrError::InvalidForm(invalid))
        }
    }
}

fn is_acceptable(
    field: EmployeeField,
    value: &str,
    reference: &ReferenceData,
    today: NaiveDate,
) -> bool {
    if is_blank(value) {
        return false;
    }
    match field {
        EmployeeField::DateOfBirth | EmployeeField::StartDate => parse_iso_date(value)
            .is_some_and(|date| (min_form_date()..=today).contains(&date)),
        EmployeeField::ZipCode => value.chars().all(|c| c.is_ascii_digit()),
        EmployeeField::State => reference.has_state(value),
        EmployeeField::Department => reference.has_department(value),
        _ => true,
    }
}

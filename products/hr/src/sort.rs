//! Column sorting of the displayed rows.

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    employee::{Employee, EmployeeField},
    error::HrError,
    validation::parse_iso_date,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = HrError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(HrError::InvalidSortDirection(raw.to_string())),
        }
    }
}

/// Parses `field:direction`, e.g. `startDate:desc`.
pub fn parse_sort_spec(raw: &str) -> Result<(EmployeeField, SortDirection), HrError> {
    let (field, direction) = raw
        .split_once(':')
        .ok_or_else(|| HrError::InvalidSortDirection(raw.to_string()))?;
    Ok((field.parse()?, direction.parse()?))
}

// Well-formed dates order chronologically and ahead of anything unparsable.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Date(NaiveDate),
    Text(&'a str),
}

fn sort_key(employee: &Employee, field: EmployeeField) -> SortKey<'_> {
    let value = employee.get(field);
    if field.is_date() {
        if let Some(date) = parse_iso_date(value) {
            return SortKey::Date(date);
        }
    }
    SortKey::Text(value)
}

pub fn compare(
    a: &Employee,
    b: &Employee,
    field: EmployeeField,
    direction: SortDirection,
) -> Ordering {
    let ordering = sort_key(a, field).cmp(&sort_key(b, field));
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Remembers the active column so repeated clicks are no-ops.
#[derive(Clone, Debug, Default)]
pub struct SortEngine {
    active: Option<(EmployeeField, SortDirection)>,
}

impl SortEngine {
    pub fn active(&self) -> Option<(EmployeeField, SortDirection)> {
        self.active
    }

    /// Stable sort of `rows`. Returns false, leaving `rows` untouched, when
    /// the same field and direction are already active.
    pub fn sort_by(
        &mut self,
        rows: &mut [Employee],
        field: EmployeeField,
        direction: SortDirection,
    ) -> bool {
        if self.active == Some((field, direction)) {
            return false;
        }
        rows.sort_by(|a, b| compare(a, b, field, direction));
        self.active = Some((field, direction));
        debug!(%field, %direction, rows = rows.len(), "rows sorted");
        true
    }

    pub fn reset(&mut self) {
        self.active = None;
    }
}

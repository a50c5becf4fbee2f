//! Search-and-limit derivation of the rows eligible for display.

use std::{fmt, num::NonZeroUsize, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{employee::Employee, error::HrError};

/// How many matching rows to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntriesLimit {
    Count(NonZeroUsize),
    /// Every match; resolved against the store size at derivation time.
    All,
}

impl EntriesLimit {
    /// The entries-to-show choices offered to the user.
    pub const CHOICES: [EntriesLimit; 5] = [
        EntriesLimit::count(10),
        EntriesLimit::count(25),
        EntriesLimit::count(50),
        EntriesLimit::count(100),
        EntriesLimit::All,
    ];

    pub const DEFAULT_COUNT: EntriesLimit = EntriesLimit::CHOICES[0];

    /// A fixed row count; zero means no bound.
    pub const fn count(rows: usize) -> Self {
        match NonZeroUsize::new(rows) {
            Some(rows) => EntriesLimit::Count(rows),
            None => EntriesLimit::All,
        }
    }

    /// Show everything when there is data at startup, otherwise ten rows.
    pub fn initial(store_len: usize) -> Self {
        if store_len > 0 {
            EntriesLimit::All
        } else {
            Self::DEFAULT_COUNT
        }
    }

    pub fn resolve(self, store_len: usize) -> usize {
        match self {
            EntriesLimit::Count(count) => count.get(),
            EntriesLimit::All => store_len,
        }
    }
}

impl fmt::Display for EntriesLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntriesLimit::Count(count) => write!(f, "{count}"),
            EntriesLimit::All => f.write_str("all"),
        }
    }
}

impl FromStr for EntriesLimit {
    type Err = HrError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(EntriesLimit::All);
        }
        trimmed
            .parse::<NonZeroUsize>()
            .map(EntriesLimit::Count)
            .map_err(|_| HrError::InvalidEntriesLimit(raw.to_string()))
    }
}

/// Case-insensitive prefix match against any value of the record.
pub fn matches_query(employee: &Employee, query: &str) -> bool {
    matches_lowercase(employee, &query.to_lowercase())
}

fn matches_lowercase(employee: &Employee, needle: &str) -> bool {
    employee
        .searchable_values()
        .any(|value| value.to_lowercase().starts_with(needle))
}

/// Matching records in store order, truncated to `limit`.
pub fn derive_view(records: &[Employee], query: &str, limit: EntriesLimit) -> Vec<Employee> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|employee| matches_lowercase(employee, &needle))
        .take(limit.resolve(records.len()))
        .cloned()
        .collect()
}

/// The "Showing 1 to 10 of 57 entries" footer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ViewSummary {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl ViewSummary {
    pub fn new(shown: usize, total: usize) -> Self {
        Self {
            first: usize::from(shown > 0),
            last: shown,
            total,
        }
    }
}

impl fmt::Display for ViewSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} to {} of {} entries",
            self.first, self.last, self.total
        )
    }
}

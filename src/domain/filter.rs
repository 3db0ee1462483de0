//! Reusable filter criteria shared by the record domains.
//!
//! Each record module composes these into predicates for a
//! [`TableQuery`](crate::domain::table::TableQuery). Key parsing is lenient:
//! an unrecognised key falls back to the type's default rather than failing.

use chrono::{DateTime, Duration, Months, Utc};
use std::cmp::Ordering;

/// Case-insensitive free-text search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm {
    needle: String,
}

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// True if the term is empty or any field contains it.
    pub fn matches(&self, fields: &[&str]) -> bool {
        self.is_empty()
            || fields
                .iter()
                .any(|f| f.to_lowercase().contains(&self.needle))
    }
}

/// Categorical filter with an "all" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category<C> {
    All,
    Only(C),
}

impl<C> Default for Category<C> {
    fn default() -> Self {
        Category::All
    }
}

impl<C: PartialEq> Category<C> {
    pub fn admits(&self, value: &C) -> bool {
        match self {
            Category::All => true,
            Category::Only(c) => c == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Category::All)
    }
}

/// Trailing time window for dated records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateRange {
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_uppercase().as_str() {
            "TODAY" => DateRange::Today,
            "WEEK" => DateRange::Week,
            "MONTH" => DateRange::Month,
            _ => DateRange::All,
        }
    }

    /// Earliest admitted timestamp relative to `now`, or `None` for no bound.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            DateRange::All => None,
            DateRange::Today => now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .map(|midnight| midnight.and_utc()),
            DateRange::Week => Some(now - Duration::days(7)),
            DateRange::Month => Some(
                now.checked_sub_months(Months::new(1))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            ),
        }
    }

    pub fn admits(self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.cutoff(now) {
            None => true,
            Some(cutoff) => timestamp >= cutoff,
        }
    }
}

/// Case-insensitive ordering with a case-sensitive tiebreak.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Descending numeric ordering; NaN sorts consistently via `total_cmp`.
pub fn compare_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

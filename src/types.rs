//! Shared primitive types, the composite entry key, and date helpers.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of bottles/cans on hand.
pub type Count = i64;

/// `chrono` pattern for the `dd/MM/yyyy` dates used at every text boundary.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a `dd/MM/yyyy` date string.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Formats a date as `dd/MM/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Composite identity of an entry: one batch per name and expiration date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryKey {
    /// Beverage name.
    pub name: String,
    /// Expiration date.
    pub expires: NaiveDate,
}

impl EntryKey {
    /// Builds a key from an already parsed date.
    pub fn new(name: impl Into<String>, expires: NaiveDate) -> Self {
        Self {
            name: name.into(),
            expires,
        }
    }

    /// Builds a key from a `dd/MM/yyyy` date string.
    pub fn parse(name: &str, date: &str) -> Option<Self> {
        parse_date(date).map(|expires| Self::new(name, expires))
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, format_date(self.expires))
    }
}

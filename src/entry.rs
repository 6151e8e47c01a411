//! Inventory entry record, creation draft, and the line serializer.

use std::fmt;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::{Count, EntryKey, format_date};

/// Field delimiter of a serialized entry line.
pub const FIELD_DELIMITER: char = ';';

/// One batch of a beverage: fixed metadata plus the on-hand count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Beverage name.
    pub name: String,
    /// Country of origin.
    pub country: String,
    /// Beverage style.
    pub style: String,
    /// Expiration date.
    pub expires: NaiveDate,
    /// Alcohol by volume, in percent.
    pub abv: f64,
    /// Container volume in centiliters.
    pub volume: f64,
    /// Bottles/cans on hand.
    pub count: Count,
}

/// Insert payload used to create a new [`Entry`] from user-facing text.
///
/// The date is carried as a `dd/MM/yyyy` string and parsed by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    /// Beverage name.
    pub name: String,
    /// Expiration date as `dd/MM/yyyy`.
    pub date: String,
    /// Initial bottles/cans on hand.
    pub count: Count,
    /// Country of origin.
    pub country: String,
    /// Beverage style.
    pub style: String,
    /// Alcohol by volume, in percent.
    pub abv: f64,
    /// Container volume in centiliters.
    pub volume: f64,
}

impl Entry {
    /// Creates a record. Field ranges are not validated.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        style: impl Into<String>,
        expires: NaiveDate,
        abv: f64,
        volume: f64,
        count: Count,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            style: style.into(),
            expires,
            abv,
            volume,
            count,
        }
    }

    /// Composite key identifying this entry in a store.
    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.name.clone(), self.expires)
    }

    /// Adds `n` bottles and returns the new count. Negative values are
    /// accepted and lower the count.
    ///
    /// `None` on overflow; the count is left unchanged.
    pub fn add_bottles(&mut self, n: Count) -> Option<Count> {
        self.count = self.count.checked_add(n)?;
        Some(self.count)
    }

    /// Removes `n` bottles and returns true once the count is zero or below.
    /// `None` on overflow, with the count unchanged.
    ///
    /// The entry never deletes itself; the owning store does.
    pub fn remove_bottles(&mut self, n: Count) -> Option<bool> {
        self.count = self.count.checked_sub(n)?;
        Some(self.count <= 0)
    }

    /// True when the entry expires on or before `now` plus one month.
    pub fn is_near_expiry(&self, now: NaiveDate) -> bool {
        match now.checked_add_months(Months::new(1)) {
            Some(threshold) => self.expires <= threshold,
            None => true,
        }
    }

    /// True when a text field contains a delimiter or line break, or has
    /// surrounding whitespace, and would not survive a serialize/parse cycle.
    pub fn has_unsafe_fields(&self) -> bool {
        [&self.name, &self.country, &self.style].iter().any(|f| {
            f.contains(FIELD_DELIMITER) || f.contains('\n') || f.contains('\r') || f.trim() != f.as_str()
        })
    }
}

/// Serializes to `name;country;style;abv;volume;dd/MM/yyyy;count`.
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{:.1};{:.1};{};{}",
            self.name,
            self.country,
            self.style,
            self.abv,
            self.volume,
            format_date(self.expires),
            self.count
        )
    }
}

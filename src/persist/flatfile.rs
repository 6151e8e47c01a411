//! Line-oriented flat-file codec.
//!
//! One entry per line: `name;country;style;abv;volume;dd/MM/yyyy;count`.
//! Fields are not escaped.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    core::store::{CellarStore, InsertOutcome, StoreError},
    entry::{Entry, FIELD_DELIMITER},
    types::{Count, parse_date},
};

use super::{Backend, PersistError, PersistResult};

/// Why a single line could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Wrong number of `;`-separated fields.
    #[error("expected 7 fields, found {0}")]
    FieldCount(usize),
    /// A numeric field that does not parse.
    #[error("invalid {field} {value:?}")]
    Number {
        /// Field name: `abv`, `volume` or `count`.
        field: &'static str,
        /// Raw field text.
        value: String,
    },
    /// Date field that is not `dd/mm/yyyy`.
    #[error("invalid date {0:?}, expected dd/mm/yyyy")]
    Date(String),
    /// The line decoded but the store refused it, e.g. a merge that overflows
    /// the count.
    #[error(transparent)]
    Rejected(#[from] StoreError),
}

/// What to do with a line that does not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Log the line, record it in the report, and keep going.
    #[default]
    Lenient,
    /// Abort the load with [`PersistError::Parse`].
    Strict,
}

/// A line left out of a lenient load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// One-based line number.
    pub line: usize,
    /// Why it was left out.
    pub error: ParseError,
}

/// Summary of a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Lines that created a new entry.
    pub loaded: usize,
    /// Lines whose key was already present and whose count was summed in.
    pub merged: usize,
    /// Lines carrying a count of zero or below for an unseen key.
    pub discarded: usize,
    /// Lines left out under [`LoadPolicy::Lenient`].
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    /// True when no line was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Decodes one non-empty line. Text fields are trimmed, matching what
/// [`CellarStore::create`] stores.
pub fn decode_line(line: &str) -> Result<Entry, ParseError> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    let [name, country, style, abv, volume, date, count] = fields.as_slice() else {
        return Err(ParseError::FieldCount(fields.len()));
    };

    let abv = parse_number::<f64>("abv", abv)?;
    let volume = parse_number::<f64>("volume", volume)?;
    let count = parse_number::<Count>("count", count)?;
    let expires = parse_date(date).ok_or_else(|| ParseError::Date(date.to_string()))?;

    Ok(Entry::new(name.trim(), country.trim(), style.trim(), expires, abv, volume, count))
}

/// Reads `path` into `store` with the lenient policy.
pub fn load_into(store: &mut CellarStore, path: impl AsRef<Path>) -> PersistResult<LoadReport> {
    load_with_policy(store, path, LoadPolicy::Lenient)
}

/// Reads `path` into `store`. A missing file is an empty inventory.
pub fn load_with_policy(
    store: &mut CellarStore,
    path: impl AsRef<Path>,
    policy: LoadPolicy,
) -> PersistResult<LoadReport> {
    let path = path.as_ref();
    let mut report = LoadReport::default();
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no inventory file, starting empty");
        return Ok(report);
    }

    let reader = BufReader::new(File::open(path)?);
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let outcome = decode_line(trimmed)
            .and_then(|entry| store.insert_entry(entry).map_err(ParseError::from));
        match outcome {
            Ok(InsertOutcome::Inserted) => report.loaded += 1,
            Ok(InsertOutcome::Merged(_)) => report.merged += 1,
            Ok(InsertOutcome::Discarded) => report.discarded += 1,
            Err(error) => {
                if policy == LoadPolicy::Strict {
                    return Err(PersistError::Parse {
                        line: line_no,
                        source: error,
                    });
                }
                tracing::warn!(path = %path.display(), line = line_no, %error, "skipping line");
                report.skipped.push(SkippedLine {
                    line: line_no,
                    error,
                });
            }
        }
    }

    tracing::info!(
        path = %path.display(),
        loaded = report.loaded,
        merged = report.merged,
        skipped = report.skipped.len(),
        "inventory loaded"
    );
    Ok(report)
}

/// Overwrites `path` with every entry of `store`, in name order.
pub fn save(store: &CellarStore, path: impl AsRef<Path>) -> PersistResult<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    for entry in store.list_by_name() {
        if entry.has_unsafe_fields() {
            tracing::warn!(key = %entry.key(), "entry text will not load back intact");
        }
        writeln!(out, "{entry}")?;
    }
    out.flush()?;
    tracing::info!(path = %path.display(), entries = store.len(), "inventory saved");
    Ok(())
}

/// Flat file at a fixed path, used for both load and save.
#[derive(Debug, Clone)]
pub struct FlatFile {
    path: PathBuf,
    policy: LoadPolicy,
}

impl FlatFile {
    /// Lenient flat file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: LoadPolicy::default(),
        }
    }

    /// Replaces the load policy.
    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// File location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for FlatFile {
    fn load_into(&self, store: &mut CellarStore) -> PersistResult<LoadReport> {
        load_with_policy(store, &self.path, self.policy)
    }

    fn save(&mut self, store: &CellarStore) -> PersistResult<()> {
        save(store, &self.path)
    }
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.trim().parse().map_err(|_| ParseError::Number {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_well_formed_line() {
        let entry = decode_line("Stout;UK;Stout;6.0;33.0;01/01/2099;12").unwrap();
        assert_eq!(entry.name, "Stout");
        assert_eq!(entry.abv, 6.0);
        assert_eq!(entry.count, 12);
        assert_eq!(entry.to_string(), "Stout;UK;Stout;6.0;33.0;01/01/2099;12");
    }

    #[test]
    fn trims_text_fields() {
        let entry = decode_line(" Stout ;UK ; Stout;6.0;33.0;01/01/2099;12").unwrap();
        assert_eq!(entry.name, "Stout");
        assert_eq!(entry.country, "UK");
        assert_eq!(entry.style, "Stout");
        assert!(!entry.has_unsafe_fields());
    }

    #[test]
    fn reports_the_failing_field() {
        assert_eq!(
            decode_line("Stout;UK;Stout;6.0;33.0;01/01/2099"),
            Err(ParseError::FieldCount(6))
        );
        assert_eq!(
            decode_line("Stout;UK;Stout;strong;33.0;01/01/2099;12"),
            Err(ParseError::Number {
                field: "abv",
                value: "strong".to_string()
            })
        );
        assert_eq!(
            decode_line("Stout;UK;Stout;6.0;33.0;2099-01-01;12"),
            Err(ParseError::Date("2099-01-01".to_string()))
        );
        assert!(matches!(
            decode_line("Stout;UK;Stout;6.0;33.0;01/01/2099;1.5"),
            Err(ParseError::Number { field: "count", .. })
        ));
    }
}

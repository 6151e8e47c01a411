use std::cmp::Ordering;
use std::path::Path;

use chrono::NaiveDate;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    core::order::SortOrder,
    entry::{Entry, EntryDraft},
    persist::{
        PersistResult,
        flatfile::{self, LoadReport},
    },
    types::{Count, EntryKey, parse_date},
};

/// Failures of store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `create` on a key that is already present.
    #[error("entry already exists: {0}")]
    DuplicateEntry(EntryKey),
    /// Mutation of a key that is not present.
    #[error("no such entry: {0}")]
    NotFound(EntryKey),
    /// Date text that is not `dd/mm/yyyy`.
    #[error("invalid date {0:?}, expected dd/mm/yyyy")]
    InvalidDate(String),
    /// The new count does not fit; the entry is unchanged.
    #[error("bottle count overflow for {0}")]
    CountOverflow(EntryKey),
}

/// Result of a count mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The entry is still present with this many bottles.
    Remaining(Count),
    /// The count reached zero or below and the entry was dropped.
    Removed,
}

/// Result of a merge-insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// New key, stored as given.
    Inserted,
    /// Key already present; counts were summed and existing metadata kept.
    Merged(Mutation),
    /// New entry with a count of zero or below; nothing was stored.
    Discarded,
}

/// Serializable copy of a store's contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Entries in name order.
    pub entries: Vec<Entry>,
}

/// Keyed inventory: at most one entry per name and expiration date, every
/// stored count above zero.
#[derive(Debug, Default)]
pub struct CellarStore {
    entries: HashMap<EntryKey, Entry>,
}

impl CellarStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from a snapshot, merging repeated keys.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for entry in snapshot.entries {
            store.insert_entry(entry)?;
        }
        Ok(store)
    }

    /// Copies every entry out in name order.
    pub fn export_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            entries: self.list_by_name().into_iter().cloned().collect(),
        }
    }

    /// True when an entry with this name and `dd/mm/yyyy` date is present.
    /// An unparseable date is never present.
    pub fn exists(&self, name: &str, date: &str) -> bool {
        self.get(name, date).is_some()
    }

    /// Looks up an entry by name and `dd/mm/yyyy` date.
    pub fn get(&self, name: &str, date: &str) -> Option<&Entry> {
        EntryKey::parse(name.trim(), date).and_then(|key| self.entries.get(&key))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Creates a new entry from a draft. Text fields are trimmed so the entry
    /// survives a save/load cycle unchanged.
    pub fn create(&mut self, draft: EntryDraft) -> Result<EntryKey, StoreError> {
        let expires =
            parse_date(&draft.date).ok_or_else(|| StoreError::InvalidDate(draft.date.clone()))?;
        let key = EntryKey::new(draft.name.trim(), expires);
        if self.entries.contains_key(&key) {
            return Err(StoreError::DuplicateEntry(key));
        }

        let entry = Entry::new(
            key.name.clone(),
            draft.country.trim(),
            draft.style.trim(),
            expires,
            draft.abv,
            draft.volume,
            draft.count,
        );
        tracing::debug!(key = %key, count = entry.count, "created entry");
        self.entries.insert(key.clone(), entry);
        Ok(key)
    }

    /// Inserts a fully built entry, summing counts into an existing entry
    /// with the same key instead of rejecting it.
    pub fn insert_entry(&mut self, entry: Entry) -> Result<InsertOutcome, StoreError> {
        let key = entry.key();
        match self.entries.get_mut(&key) {
            Some(existing) => {
                let count = existing
                    .add_bottles(entry.count)
                    .ok_or_else(|| StoreError::CountOverflow(key.clone()))?;
                tracing::debug!(key = %key, count, "merged entry into existing key");
                Ok(InsertOutcome::Merged(self.settle(key, count <= 0)))
            }
            None if entry.count <= 0 => {
                tracing::debug!(key = %key, count = entry.count, "discarded empty entry");
                Ok(InsertOutcome::Discarded)
            }
            None => {
                self.entries.insert(key, entry);
                Ok(InsertOutcome::Inserted)
            }
        }
    }

    /// Adds bottles to an existing entry. A negative `count` that empties the
    /// entry drops it.
    pub fn add_bottles(&mut self, name: &str, date: &str, count: Count) -> Result<Mutation, StoreError> {
        let key = self.resolve(name, date)?;
        let left = self
            .entries
            .get_mut(&key)
            .ok_or_else(|| StoreError::NotFound(key.clone()))?
            .add_bottles(count)
            .ok_or_else(|| StoreError::CountOverflow(key.clone()))?;
        tracing::debug!(key = %key, added = count, "added bottles");
        Ok(self.settle(key, left <= 0))
    }

    /// Removes bottles, dropping the entry once its count reaches zero.
    pub fn remove_bottles(&mut self, name: &str, date: &str, count: Count) -> Result<Mutation, StoreError> {
        let key = self.resolve(name, date)?;
        let exhausted = self
            .entries
            .get_mut(&key)
            .ok_or_else(|| StoreError::NotFound(key.clone()))?
            .remove_bottles(count)
            .ok_or_else(|| StoreError::CountOverflow(key.clone()))?;
        tracing::debug!(key = %key, removed = count, "removed bottles");
        Ok(self.settle(key, exhausted))
    }

    /// Sorts all entries with `cmp`. Every listing goes through here.
    pub fn sorted_by<F>(&self, mut cmp: F) -> Vec<&Entry>
    where
        F: FnMut(&Entry, &Entry) -> Ordering,
    {
        let mut out: Vec<&Entry> = self.entries.values().collect();
        out.sort_by(|a, b| cmp(*a, *b));
        out
    }

    /// All entries in `order`.
    pub fn list(&self, order: SortOrder) -> Vec<&Entry> {
        self.sorted_by(|a, b| order.compare(a, b))
    }

    /// Name, then expiration date.
    pub fn list_by_name(&self) -> Vec<&Entry> {
        self.list(SortOrder::Name)
    }

    /// Country, then name, then expiration date.
    pub fn list_by_country(&self) -> Vec<&Entry> {
        self.list(SortOrder::Country)
    }

    /// Style, then name, then expiration date.
    pub fn list_by_style(&self) -> Vec<&Entry> {
        self.list(SortOrder::Style)
    }

    /// Expiration date, then name.
    pub fn list_by_expiration(&self) -> Vec<&Entry> {
        self.list(SortOrder::Expiration)
    }

    /// Entries expiring on or before `now` plus one month, in expiration
    /// order. `None` when nothing qualifies.
    pub fn list_near_expiry(&self, now: NaiveDate) -> Option<Vec<&Entry>> {
        let near: Vec<&Entry> = self
            .list_by_expiration()
            .into_iter()
            .filter(|e| e.is_near_expiry(now))
            .collect();
        if near.is_empty() { None } else { Some(near) }
    }

    /// Loads entries from a flat file. A missing file leaves the store
    /// untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> PersistResult<LoadReport> {
        flatfile::load_into(self, path)
    }

    /// Overwrites `path` with every entry in name order.
    pub fn save(&self, path: impl AsRef<Path>) -> PersistResult<()> {
        flatfile::save(self, path)
    }

    fn resolve(&self, name: &str, date: &str) -> Result<EntryKey, StoreError> {
        EntryKey::parse(name.trim(), date).ok_or_else(|| StoreError::InvalidDate(date.to_string()))
    }

    fn settle(&mut self, key: EntryKey, exhausted: bool) -> Mutation {
        if exhausted {
            self.entries.remove(&key);
            tracing::debug!(key = %key, "entry exhausted, dropped");
            return Mutation::Removed;
        }
        let count = self.entries.get(&key).map(|e| e.count).unwrap_or(0);
        Mutation::Remaining(count)
    }
}

pub mod flatfile;

use thiserror::Error;

use crate::core::store::CellarStore;

use self::flatfile::{LoadReport, ParseError};

/// Failures of a backend.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The underlying file could not be read or written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A line failed to load under [`flatfile::LoadPolicy::Strict`].
    #[error("line {line}: {source}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What was wrong with it.
        #[source]
        source: ParseError,
    },
}

/// Result alias for backend operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Durable home of an inventory between runs.
pub trait Backend {
    /// Merges persisted entries into `store`.
    fn load_into(&self, store: &mut CellarStore) -> PersistResult<LoadReport>;
    /// Replaces the persisted inventory with the contents of `store`.
    fn save(&mut self, store: &CellarStore) -> PersistResult<()>;
}

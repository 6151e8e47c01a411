//! Personal beverage inventory with flat-file persistence.
//!
//! # Examples
//!
//! In-memory usage with [`core::store::CellarStore`]:
//! ```
//! use cellar::{core::store::CellarStore, entry::EntryDraft};
//!
//! let mut store = CellarStore::new();
//! store.create(EntryDraft {
//!     name: "Stout".to_string(),
//!     date: "01/01/2099".to_string(),
//!     count: 12,
//!     country: "UK".to_string(),
//!     style: "Stout".to_string(),
//!     abv: 6.0,
//!     volume: 33.0,
//! }).expect("create");
//! assert!(store.exists("Stout", "01/01/2099"));
//!
//! store.remove_bottles("Stout", "01/01/2099", 12).expect("remove");
//! assert!(!store.exists("Stout", "01/01/2099"));
//! ```
//!
//! Scripted session against a flat file:
//! ```no_run
//! use std::io::{self, Cursor};
//!
//! use cellar::{
//!     core::store::CellarStore,
//!     persist::{Backend, flatfile::FlatFile},
//!     runtime::session::Session,
//! };
//!
//! let file = FlatFile::new("beers.txt");
//! let mut store = CellarStore::new();
//! file.load_into(&mut store).expect("load");
//! let script = Cursor::new("3\n1\n0\n");
//! let store = Session::new(store, file, script, io::stdout()).run().expect("session");
//! println!("{} entries", store.len());
//! ```
#![warn(missing_docs)]

/// Core in-memory store and sort orders.
pub mod core;
/// Inventory entry record and draft.
pub mod entry;
/// Persistence abstraction and flat-file codec.
pub mod persist;
/// Interactive prompt session.
pub mod runtime;
/// Shared primitive types, entry key, and date helpers.
pub mod types;

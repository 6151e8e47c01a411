//! In-memory authoritative store and its sort orders.

/// Stateless comparators for listing entries.
pub mod order;
/// Authoritative inventory store.
pub mod store;

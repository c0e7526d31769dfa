/// State management module
///
/// This module handles all gallery state, including:
/// - The collection view-state: filter, pagination, annotation merge (view.rs)
/// - The search predicate (filter.rs)
/// - Shared data structures (data.rs)
/// - The key-value persistence seam (store.rs) and its SQLite catalog (library.rs)
/// - Persisted local uploads (uploads.rs)

pub mod data;
pub mod filter;
pub mod library;
pub mod store;
pub mod uploads;
pub mod view;

//! Per-user state persistence for tutorbot.
//!
//! A single JSON file maps user identifiers to arbitrary JSON state. The
//! whole file is rewritten on every mutation, so the in-memory view and the
//! file on disk agree after each [`StateStore::set`] returns.
//!
//! - [`StateStore`] -- load-once, write-through store
//! - [`StoreError`] -- persistence failures surfaced to callers

mod error;
mod state_store;

pub use error::StoreError;
pub use state_store::StateStore;

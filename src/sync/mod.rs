//! Local/remote reconciliation.
//!
//! The sync engine compares Local Store state against Registry Client
//! state and applies changes in one direction. It never merges divergent
//! content: direction is always an explicit caller choice.
//!
//! # Modules
//!
//! - [`diff`] - comparison outcome ([`SyncStatus`]) and the
//!   machine-readable [`DiffSummary`]
//! - [`engine`] - per-invocation state machine driving `get`/`put`
//! - [`watch`] - debounced filesystem-watch republish loop

pub mod diff;
pub mod engine;
pub mod watch;

pub use diff::{compare, DiffSummary, SyncStatus};
pub use engine::{GetOutcome, PutOutcome, SyncEngine, SyncState};
pub use watch::{watch, Republisher, WatchOptions, WatchOutcome};

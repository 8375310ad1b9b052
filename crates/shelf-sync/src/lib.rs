//! Mirrors a remote Markdown tree into a [`DocumentStore`].
//!
//! [`Synchronizer::sync`] lists the remote tree, diffs it against the stored
//! documents, fetches what changed, soft-deletes what disappeared, rebuilds
//! category rollups and appends one audit record per run.
//!
//! [`DocumentStore`]: shelf_core::store::DocumentStore

pub mod error;
mod synchronizer;

pub use error::{Error, Result};
pub use synchronizer::{SyncReport, Synchronizer};

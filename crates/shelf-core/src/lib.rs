//! Core types and trait definitions for Shelf.
//!
//! Shelf mirrors a repository of Markdown notes into a relational store. This
//! crate holds the pure parts of that pipeline: path taxonomy, change
//! detection, folder derivation and description extraction, plus the
//! [`store::DocumentStore`] and [`source::ContentSource`] seams. It has no
//! HTTP or database dependencies.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod diff;
pub mod document;
pub mod error;
pub mod excerpt;
pub mod folder;
pub mod icons;
pub mod noop;
pub mod source;
pub mod store;
pub mod taxonomy;

pub use error::{Error, Result};

//! GitHub-backed [`ContentSource`](shelf_core::source::ContentSource).
//!
//! Lists and fetches Markdown documents through the REST "repository
//! contents" endpoint, one request per directory and per file.

pub mod error;
mod source;
mod types;

pub use error::{GithubError, Result};
pub use source::{DEFAULT_API_BASE, DEFAULT_OWNER, DEFAULT_REPO, GithubConfig, GithubSource};

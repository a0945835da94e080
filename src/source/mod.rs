//! Article source abstraction layer.
//!
//! This module defines the [`ArticleSource`] trait, the common [`Article`]
//! type and the [`FetchError`] every source reports.  Concrete sources live
//! in sub-modules (currently only [`hn`]).
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `lobsters.rs`).
//! 2. Define a struct and implement [`ArticleSource`] for it.
//! 3. Add `mod lobsters;` below and re-export your struct.
//! 4. Construct it in `main.rs` instead of [`HnSource`].
//!
//! The session, state machine and UI are all source-agnostic.

mod article;
mod hn;
#[cfg(test)]
pub mod mock;

pub use article::{Article, SortField};
pub use hn::{HnSource, DEFAULT_ENDPOINT};

use async_trait::async_trait;
use thiserror::Error;

/// Why a fetch failed.
///
/// The state machine only ever sees "failed"; the variants exist for the
/// diagnostic trace.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Trait that every article source must implement.
///
/// Fetches run on the tokio runtime while the UI thread keeps drawing, so
/// implementations must be [`Send`] + [`Sync`].
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Human-readable label shown in the UI.
    fn name(&self) -> &str;

    /// Compose the query target for a search term.
    fn query_target(&self, term: &str) -> String;

    /// Issue one request to `target` and return the hits it contains.
    async fn fetch(&self, target: &str) -> Result<Vec<Article>, FetchError>;
}

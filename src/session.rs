//! Search session controller.
//!
//! Owns the search term (persisted on every edit), the query target derived
//! from it, and the request sequence counter.  It decides *when* a fetch is
//! due; executing it is [`crate::fetch`]'s job.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::source::ArticleSource;
use crate::store::{KeyValueStore, SEARCH_KEY};

/// A fetch the session wants executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Monotonic per session; only the latest one may update state.
    pub seq: u64,
    pub target: String,
}

pub struct SearchSession {
    source: Arc<dyn ArticleSource>,
    store: Box<dyn KeyValueStore>,
    term: String,
    target: String,
    last_seq: u64,
}

impl SearchSession {
    /// Start a session from the persisted term, or `default_term` if none was
    /// saved.
    pub fn new(
        source: Arc<dyn ArticleSource>,
        store: Box<dyn KeyValueStore>,
        default_term: &str,
    ) -> Self {
        let term = store
            .get(SEARCH_KEY)
            .unwrap_or_else(|| default_term.to_string());
        let target = source.query_target(&term);
        debug!(%term, "search session started");

        Self {
            source,
            store,
            term,
            target,
            last_seq: 0,
        }
    }

    pub fn source(&self) -> Arc<dyn ArticleSource> {
        Arc::clone(&self.source)
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Replace the term and write it through to the store.  Never fetches.
    pub fn set_search_term(&mut self, text: impl Into<String>) {
        self.term = text.into();
        if let Err(e) = self.store.set(SEARCH_KEY, &self.term) {
            warn!(error = %e, "failed to persist search term");
        }
    }

    /// The fetch issued once when the session is mounted, for whatever term
    /// is current at that point.
    pub fn initial_request(&mut self) -> FetchRequest {
        self.target = self.source.query_target(&self.term);
        self.issue()
    }

    /// Re-derive the query target from the current term.
    ///
    /// Returns a request only when the target actually changed.
    pub fn submit_search(&mut self) -> Option<FetchRequest> {
        let target = self.source.query_target(&self.term);
        if target == self.target {
            debug!(%target, "query target unchanged, not fetching");
            return None;
        }
        self.target = target;
        Some(self.issue())
    }

    /// Re-issue the current target regardless of whether it changed.
    pub fn retry(&mut self) -> FetchRequest {
        self.issue()
    }

    /// Whether `seq` belongs to the most recently issued request.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.last_seq
    }

    fn issue(&mut self) -> FetchRequest {
        self.last_seq += 1;
        FetchRequest {
            seq: self.last_seq,
            target: self.target.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

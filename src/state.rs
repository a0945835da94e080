//! Result set state machine.
//!
//! [`ResultSetState`] is an immutable snapshot.  Every [`Action`] consumes the
//! current snapshot and produces the next one via [`ResultSetState::apply`];
//! nothing mutates a snapshot that someone else might still be looking at.
//!
//! ```text
//!            FetchInit            FetchSuccess(items)
//!   Idle ──────────────► Loading ─────────────────────► Success
//!     ▲                     │
//!     │                     └─────── FetchFailure ────► Failure
//!     │
//!     └── RemoveItem / Sort keep the current state and only touch `items`
//! ```

use crate::source::{Article, SortField};

/// Commands accepted by the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A fetch has been issued.
    FetchInit,
    /// The outstanding fetch returned these items (replaces, never merges).
    FetchSuccess(Vec<Article>),
    /// The outstanding fetch failed.  Items stay as they were.
    FetchFailure,
    /// Drop the article with this identifier from the current view.
    RemoveItem(String),
    /// Re-order by a field, toggling the shared direction flag.
    Sort(SortField),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSetState {
    /// Articles in the order currently in effect.
    pub items: Vec<Article>,
    pub is_loading: bool,
    pub is_error: bool,
    /// Shared across all fields: `true` means the next sort is descending.
    pub sort_reversed: bool,
}

impl ResultSetState {
    /// The start-of-session state: no items, all flags false.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action and return the next snapshot.
    pub fn apply(self, action: Action) -> Self {
        match action {
            Action::FetchInit => Self {
                is_loading: true,
                is_error: false,
                ..self
            },
            Action::FetchSuccess(items) => Self {
                items,
                is_loading: false,
                is_error: false,
                ..self
            },
            Action::FetchFailure => Self {
                is_loading: false,
                is_error: true,
                ..self
            },
            Action::RemoveItem(id) => {
                let items = self.items.into_iter().filter(|a| a.id != id).collect();
                Self { items, ..self }
            }
            Action::Sort(field) => {
                let mut items = self.items;
                // `sort_by` is stable; the descending case reverses the whole
                // ascending result, ties included.
                items.sort_by(|a, b| field.compare(a, b));
                if self.sort_reversed {
                    items.reverse();
                }
                Self {
                    items,
                    sort_reversed: !self.sort_reversed,
                    ..self
                }
            }
        }
    }

    /// Whether the error message should replace the list.
    pub fn shows_error(&self) -> bool {
        self.is_error && !self.is_loading
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use std::mem;

use ratatui::widgets::ListState;
use tracing::debug;

use crate::fetch::FetchMsg;
use crate::session::{FetchRequest, SearchSession};
use crate::source::{Article, SortField};
use crate::state::{Action, ResultSetState};

/// Where key presses go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Keys drive the result list.
    Browse,
    /// Keys edit the search term.
    Editing,
}

pub struct App {
    session: SearchSession,
    /// Current snapshot; replaced wholesale by [`App::dispatch`].
    state: ResultSetState,
    /// List selection state for scrolling.
    pub list_state: ListState,
    pub mode: Mode,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Last status message.
    pub status: String,
}

impl App {
    pub fn new(session: SearchSession) -> Self {
        Self {
            session,
            state: ResultSetState::new(),
            list_state: ListState::default(),
            mode: Mode::Browse,
            quit: false,
            status: "Starting…".into(),
        }
    }

    pub fn state(&self) -> &ResultSetState {
        &self.state
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn items(&self) -> &[Article] {
        &self.state.items
    }

    /// Apply an action to the result set.  The single place state changes.
    pub fn dispatch(&mut self, action: Action) {
        let current = mem::take(&mut self.state);
        self.state = current.apply(action);
        self.clamp_selection();
    }

    // -- fetch lifecycle -----------------------------------------------------

    /// The fetch issued on start-up, before any input.
    pub fn start(&mut self) -> FetchRequest {
        let request = self.session.initial_request();
        self.begin_fetch(request)
    }

    /// Submit the edited term.  Fetches only when the query target changed.
    pub fn submit(&mut self) -> Option<FetchRequest> {
        self.mode = Mode::Browse;
        match self.session.submit_search() {
            Some(request) => Some(self.begin_fetch(request)),
            None if self.state.is_error => {
                self.status = "Search failed, press r to retry".into();
                None
            }
            None => {
                self.status = format!("Already showing \"{}\"", self.session.term());
                None
            }
        }
    }

    /// Re-run the current query.
    pub fn retry(&mut self) -> FetchRequest {
        let request = self.session.retry();
        self.begin_fetch(request)
    }

    fn begin_fetch(&mut self, request: FetchRequest) -> FetchRequest {
        debug!(seq = request.seq, url = %request.target, "fetch issued");
        self.dispatch(Action::FetchInit);
        self.status = format!("Searching \"{}\"…", self.session.term());
        request
    }

    /// Apply a finished fetch, unless a newer request has been issued since.
    pub fn handle_fetch(&mut self, msg: FetchMsg) {
        if !self.session.is_current(msg.seq) {
            debug!(
                seq = msg.seq,
                current = self.session.target(),
                "discarding stale fetch result"
            );
            return;
        }

        match msg.outcome {
            Ok(items) => {
                let count = items.len();
                self.dispatch(Action::FetchSuccess(items));
                self.list_state.select(if count > 0 { Some(0) } else { None });
                self.status = format!("Fetched {count} stories");
            }
            Err(_) => {
                self.dispatch(Action::FetchFailure);
                self.status = "Fetch failed".into();
            }
        }
    }

    // -- list commands -------------------------------------------------------

    /// Whether the list is on screen.  While loading or after a failure the
    /// rows are hidden, and the list commands below do nothing.
    pub fn list_visible(&self) -> bool {
        !self.state.is_loading && !self.state.is_error
    }

    /// Dismiss the highlighted article from the current view.
    pub fn dismiss_selected(&mut self) {
        if !self.list_visible() {
            return;
        }
        let Some(article) = self
            .list_state
            .selected()
            .and_then(|i| self.state.items.get(i))
        else {
            return;
        };
        let id = article.id.clone();
        let title = article.title.clone();
        self.dispatch(Action::RemoveItem(id));
        self.status = format!("Dismissed \"{title}\"");
    }

    pub fn sort_by(&mut self, field: SortField) {
        if !self.list_visible() {
            return;
        }
        let direction = if self.state.sort_reversed {
            "descending"
        } else {
            "ascending"
        };
        self.dispatch(Action::Sort(field));
        self.status = format!("Sorted by {} ({direction})", field.label());
    }

    // -- search text ---------------------------------------------------------

    pub fn start_editing(&mut self) {
        self.mode = Mode::Editing;
    }

    pub fn stop_editing(&mut self) {
        self.mode = Mode::Browse;
    }

    pub fn push_char(&mut self, c: char) {
        let mut term = self.session.term().to_string();
        term.push(c);
        self.session.set_search_term(term);
    }

    pub fn pop_char(&mut self) {
        let mut term = self.session.term().to_string();
        if term.pop().is_some() {
            self.session.set_search_term(term);
        }
    }

    pub fn clear_term(&mut self) {
        self.session.set_search_term("");
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        if !self.list_visible() {
            return;
        }
        let len = self.state.items.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if !self.list_visible() {
            return;
        }
        if self.state.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.list_visible() {
            return;
        }
        if !self.state.items.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.list_visible() {
            return;
        }
        if !self.state.items.is_empty() {
            self.list_state.select(Some(self.state.items.len() - 1));
        }
    }

    /// Keep the selection inside the list after it shrinks.
    fn clamp_selection(&mut self) {
        let len = self.state.items.len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }
}

//! Background fetch execution.
//!
//! Each [`FetchRequest`] runs as its own task on the tokio runtime and sends
//! a [`FetchMsg`] back to the UI thread over an [`mpsc`] channel.  The UI
//! thread drains the channel every tick and is the only writer of state.
//!
//! ## For contributors
//!
//! Nothing here cancels an in-flight request.  Stale responses are dropped on
//! arrival instead; see [`crate::app::App::handle_fetch`].

use std::sync::mpsc;
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{info, warn};

use crate::session::FetchRequest;
use crate::source::{Article, ArticleSource, FetchError};

/// Result of one fetch, tagged with the request it answers.
#[derive(Debug)]
pub struct FetchMsg {
    pub seq: u64,
    pub outcome: Result<Vec<Article>, FetchError>,
}

/// Run `request` against `source` on the runtime behind `handle`.
pub fn spawn_fetch(
    handle: &Handle,
    source: Arc<dyn ArticleSource>,
    request: FetchRequest,
    tx: mpsc::Sender<FetchMsg>,
) {
    handle.spawn(async move {
        let outcome = source.fetch(&request.target).await;
        match &outcome {
            Ok(items) => info!(
                seq = request.seq,
                source = source.name(),
                count = items.len(),
                "fetch complete"
            ),
            Err(e) => warn!(
                seq = request.seq,
                source = source.name(),
                error = %e,
                "fetch failed"
            ),
        }
        // If the receiver is gone the UI has exited; nothing to report to.
        let _ = tx.send(FetchMsg {
            seq: request.seq,
            outcome,
        });
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Contribution session state
//!
//! The single shared mutable state consumed by presentation. Consumers read a
//! snapshot and subscribe to change events; only this module mutates fields.
//!
//! Ordering guarantee: each `select_record` invocation is tagged with a
//! monotonically increasing sequence number, and only the most recent
//! invocation's result is allowed to land in `selected`/`error`. All outcome
//! fields live behind one lock, and the sequence is re-checked while that lock
//! is held, with no suspension points between the check and the writes — a
//! superseded call's result is discarded whole, regardless of network or
//! storage completion order.

use crate::backend::BackendClient;
use crate::notify::Notifier;
use crate::resolver::Resolver;
use givtrack_common::config::MultiMatchPolicy;
use givtrack_common::db::{SeenSetStore, OPENED_IDS_KEY};
use givtrack_common::ContributionRecord;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

/// State-change events for subscribed consumers
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The active selection changed; carries the newly selected id, if any
    SelectionChanged(Option<String>),
    /// The browse list was (re)loaded with this many records
    ListLoaded(usize),
    /// A fetch failed with this user-visible message
    FetchFailed(String),
}

/// Read-only view of the session state at one instant
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub records: Vec<ContributionRecord>,
    pub selected: Option<ContributionRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Session fields, kept under a single lock so an outcome commits atomically
#[derive(Default)]
struct SessionFields {
    records: Vec<ContributionRecord>,
    selected: Option<ContributionRecord>,
    loading: bool,
    error: Option<String>,
}

/// What a `select_record` invocation committed, decided under the state guard
enum Commit {
    Selected(String),
    EmptyState(String),
    Failed(String),
    Stale,
}

/// Shared session state for the QR-resolution pipeline
pub struct Session {
    state: RwLock<SessionFields>,

    /// Sequence tag for last-caller-wins selection ordering
    select_seq: AtomicU64,

    event_tx: broadcast::Sender<SessionEvent>,

    client: BackendClient,
    resolver: Resolver,
    seen: SeenSetStore,
    notifier: Arc<dyn Notifier>,
}

impl Session {
    pub fn new(
        client: BackendClient,
        policy: MultiMatchPolicy,
        seen: SeenSetStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(32);
        Self {
            state: RwLock::new(SessionFields::default()),
            select_seq: AtomicU64::new(0),
            event_tx,
            resolver: Resolver::new(client.clone(), policy),
            client,
            seen,
            notifier,
        }
    }

    /// Resolve `code` and make the result the active selection
    ///
    /// Exactly one of `{selected, error}` is set on completion. Empty-state
    /// outcomes (`NoCode`, zero matches) clear the selection; backend failures
    /// leave the prior selection untouched. A successful selection appends the
    /// record id to the persistent seen-set (best-effort) after the outcome
    /// has committed.
    pub async fn select_record(&self, code: &str) {
        let seq = self.select_seq.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.write().await;
            // A newer call may already have raced past this one
            if self.select_seq.load(Ordering::SeqCst) == seq {
                state.loading = true;
                state.error = None;
            }
        }

        let outcome = self.resolver.resolve(code).await;

        let commit = {
            let mut state = self.state.write().await;
            // Re-checked under the guard: nothing suspends between this check
            // and the writes, so a stale result can never land after a newer
            // invocation has committed.
            if self.select_seq.load(Ordering::SeqCst) != seq {
                debug!(code = %code, seq, "Discarding stale resolution result");
                Commit::Stale
            } else {
                state.loading = false;
                match outcome {
                    Ok(record) => {
                        let id = record.id.clone();
                        state.selected = Some(record);
                        Commit::Selected(id)
                    }
                    Err(e) if e.is_empty_state() => {
                        state.selected = None;
                        state.error = Some(e.to_string());
                        Commit::EmptyState(e.to_string())
                    }
                    Err(e) => {
                        // Transient failure: prior selection remains valid
                        state.error = Some(e.to_string());
                        Commit::Failed(e.to_string())
                    }
                }
            }
        };

        match commit {
            Commit::Selected(id) => {
                self.seen.append(OPENED_IDS_KEY, &id).await;
                self.notifier.notify("Data fetched successfully.");
                self.broadcast(SessionEvent::SelectionChanged(Some(id)));
            }
            Commit::EmptyState(message) => {
                self.notifier.notify(&message);
                self.broadcast(SessionEvent::SelectionChanged(None));
            }
            Commit::Failed(message) => {
                self.notifier.notify(&format!("Failed to fetch data: {}", message));
                self.broadcast(SessionEvent::FetchFailed(message));
            }
            Commit::Stale => {}
        }
    }

    /// Fetch the full browsable record list
    ///
    /// Success replaces the list wholesale (an empty list is a legitimate
    /// "no contributions yet" state, not an error). Failure sets `error` and
    /// leaves any previously-loaded list untouched, so a transient network
    /// blip never erases a populated browse list.
    pub async fn load_all(&self) {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        match self.client.fetch_all().await {
            Ok(fetched) => {
                let count = fetched.len();
                {
                    let mut state = self.state.write().await;
                    state.records = fetched;
                    state.loading = false;
                }
                if count == 0 {
                    self.notifier.notify("No Contribution found against this QR code.");
                } else {
                    self.notifier.notify("Data fetched successfully.");
                }
                self.broadcast(SessionEvent::ListLoaded(count));
            }
            Err(e) => {
                let message = e.to_string();
                {
                    let mut state = self.state.write().await;
                    state.error = Some(message.clone());
                    state.loading = false;
                }
                self.notifier.notify("An error occurred while fetching data.");
                self.broadcast(SessionEvent::FetchFailed(message));
            }
        }
    }

    /// Reset the active selection without touching the browse list
    pub async fn clear_selection(&self) {
        self.state.write().await.selected = None;
        self.broadcast(SessionEvent::SelectionChanged(None));
    }

    /// Snapshot of all session fields for a consumer render pass
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            records: state.records.clone(),
            selected: state.selected.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// Currently selected record, if any
    pub async fn selected(&self) -> Option<ContributionRecord> {
        self.state.read().await.selected.clone()
    }

    /// Current user-visible error, if any
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Subscribe to state-change events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    fn broadcast(&self, event: SessionEvent) {
        // No receivers is fine
        let _ = self.event_tx.send(event);
    }
}

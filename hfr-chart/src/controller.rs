//! Per-session fetch state machine.
//!
//! A [`Controller`] owns one session's query window, its published
//! [`Dataset`] and its hover [`Selection`]. Submits and timer ticks each
//! take a new sequence number; a finished fetch is applied only if no newer
//! request has been issued since, so a slow, older query can never replace
//! the result of a newer one.
//!
//! Datasets and selections are published on separate `watch` channels, so
//! a hover only wakes the polar panels.

use chrono::{Local, NaiveDateTime};
use hfr_data::{clean, ValidationError};
use hfr_db::{DataAccessError, ObservationSource};
use hfr_wave::{Dataset, Observation, QueryWindow, Selection, WaveConfig, WindowError, WindowRequest};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::watch;

/// Where the session is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing fetched yet.
    Idle,
    Fetching,
    Ready,
    /// The newest fetch failed; an empty dataset is shown.
    Failed,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    DataAccess(#[from] DataAccessError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// What happened to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { seq: u64, rows: usize },
    /// A newer request was issued while this one ran; its result was dropped.
    Superseded { seq: u64, latest: u64 },
    /// The fetch failed and the session now shows an empty dataset.
    Failed { seq: u64, message: String },
}

/// Snapshot of the session besides the dataset itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub phase: Phase,
    pub window: QueryWindow,
    pub error: Option<String>,
}

struct SessionState {
    phase: Phase,
    request: WindowRequest,
    window: QueryWindow,
    error: Option<String>,
}

pub struct Controller {
    source: Arc<dyn ObservationSource>,
    config: WaveConfig,
    next_seq: AtomicU64,
    state: Mutex<SessionState>,
    dataset_tx: watch::Sender<Arc<Dataset>>,
    selection_tx: watch::Sender<Selection>,
}

impl Controller {
    /// New idle session showing the default window.
    pub fn new(source: Arc<dyn ObservationSource>, config: WaveConfig) -> Self {
        let window = QueryWindow::default_at(now(), &config);
        let (dataset_tx, _) = watch::channel(Arc::new(Dataset::default()));
        let (selection_tx, _) = watch::channel(Selection::none());
        Controller {
            source,
            config,
            next_seq: AtomicU64::new(0),
            state: Mutex::new(SessionState {
                phase: Phase::Idle,
                request: WindowRequest::default(),
                window,
                error: None,
            }),
            dataset_tx,
            selection_tx,
        }
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    /// Explicit submit: remember the request and fetch its window.
    pub async fn submit(&self, request: WindowRequest) -> Result<FetchOutcome, WindowError> {
        let window = request.resolve(now(), &self.config)?;
        let seq = {
            let mut state = self.lock();
            state.request = request;
            self.begin(&mut state, &window)
        };
        Ok(self.run(seq, window).await)
    }

    /// Timer tick: fetch the last submitted request again.
    ///
    /// Missing bounds are re-resolved, so a default trailing window moves
    /// forward with the clock.
    pub async fn refresh(&self) -> FetchOutcome {
        let (seq, window) = {
            let mut state = self.lock();
            let window = match state.request.resolve(now(), &self.config) {
                Ok(window) => window,
                // Stored requests already resolved once; keep the old window.
                Err(_) => state.window.clone(),
            };
            (self.begin(&mut state, &window), window)
        };
        self.run(seq, window).await
    }

    /// Record `window` as current and take its sequence number. Both happen
    /// under the state lock, so the newest seq always owns `state.window`.
    fn begin(&self, state: &mut SessionState, window: &QueryWindow) -> u64 {
        state.window = window.clone();
        state.phase = Phase::Fetching;
        self.next_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn run(&self, seq: u64, window: QueryWindow) -> FetchOutcome {
        log::debug!("fetch {} started for site {}", seq, window.site_id);

        let source = Arc::clone(&self.source);
        let query = window.clone();
        let result = tokio::task::spawn_blocking(move || -> Result<Vec<Observation>, FetchError> {
            let rows = source.fetch_observations(&query)?;
            Ok(clean(rows)?)
        })
        .await
        .unwrap_or_else(|e| Err(FetchError::Task(e)));

        self.apply(seq, window, result)
    }

    fn apply(
        &self,
        seq: u64,
        window: QueryWindow,
        result: Result<Vec<Observation>, FetchError>,
    ) -> FetchOutcome {
        let mut state = self.lock();
        let latest = self.next_seq.load(Ordering::SeqCst);
        if seq != latest {
            log::debug!("fetch {} superseded by {}; result dropped", seq, latest);
            return FetchOutcome::Superseded { seq, latest };
        }

        match result {
            Ok(observations) => {
                let rows = observations.len();
                state.phase = Phase::Ready;
                state.error = None;
                self.dataset_tx
                    .send_replace(Arc::new(Dataset::new(seq, window, observations)));
                FetchOutcome::Applied { seq, rows }
            }
            Err(e) => {
                let message = e.to_string();
                log::warn!("fetch {} for site {} failed: {}", seq, window.site_id, message);
                state.phase = Phase::Failed;
                state.error = Some(message.clone());
                self.dataset_tx
                    .send_replace(Arc::new(Dataset::empty_for(seq, window)));
                FetchOutcome::Failed { seq, message }
            }
        }
    }

    /// Set the hover selection. Subscribers are only woken on a change.
    pub fn select(&self, selection: Selection) {
        self.selection_tx.send_if_modified(|current| {
            if *current == selection {
                false
            } else {
                *current = selection;
                true
            }
        });
    }

    pub fn dataset(&self) -> Arc<Dataset> {
        self.dataset_tx.borrow().clone()
    }

    pub fn selection(&self) -> Selection {
        *self.selection_tx.borrow()
    }

    pub fn status(&self) -> Status {
        let state = self.lock();
        Status {
            phase: state.phase,
            window: state.window.clone(),
            error: state.error.clone(),
        }
    }

    /// Receiver woken whenever a new dataset is published.
    pub fn subscribe_dataset(&self) -> watch::Receiver<Arc<Dataset>> {
        self.dataset_tx.subscribe()
    }

    /// Receiver woken whenever the hover selection changes.
    pub fn subscribe_selection(&self) -> watch::Receiver<Selection> {
        self.selection_tx.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // State is only ever replaced field by field, so a poisoned lock
        // still holds consistent values.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

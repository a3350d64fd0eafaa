//! Live dashboard sessions, one per browser tab.

use crate::controller::Controller;
use crate::export::{self, ExportError};
use crate::view::{DashboardView, PolarPanels, ViewState};
use hfr_db::ObservationSource;
use hfr_wave::WaveConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Idle time after which a session may be evicted.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

pub struct Session {
    id: Uuid,
    controller: Controller,
    view: Mutex<ViewState>,
    last_seen: Mutex<Instant>,
}

impl Session {
    fn new(id: Uuid, controller: Controller) -> Result<Self, ExportError> {
        let view = ViewState::new(&controller)?;
        Ok(Session {
            id,
            controller,
            view: Mutex::new(view),
            last_seen: Mutex::new(Instant::now()),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Full dashboard for the current dataset and selection.
    pub fn view(&self) -> Result<DashboardView, ExportError> {
        let status = self.controller.status();
        lock(&self.view).dashboard(status)
    }

    /// Only the polar panels, for hover updates.
    pub fn polar_view(&self) -> Result<PolarPanels, ExportError> {
        lock(&self.view).polar_view()
    }

    /// CSV of the current dataset.
    pub fn export_csv(&self) -> Result<String, ExportError> {
        export::export_csv(&self.controller.dataset())
    }

    fn touch(&self) {
        *lock(&self.last_seen) = Instant::now();
    }

    fn idle_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(*lock(&self.last_seen))
    }
}

/// All live sessions, keyed by id.
pub struct SessionRegistry {
    source: Arc<dyn ObservationSource>,
    config: WaveConfig,
    ttl: Duration,
    sessions: Mutex<HashMap<Uuid, Arc<Session>>>,
}

impl SessionRegistry {
    pub fn new(source: Arc<dyn ObservationSource>, config: WaveConfig, ttl: Duration) -> Self {
        SessionRegistry {
            source,
            config,
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn source(&self) -> &Arc<dyn ObservationSource> {
        &self.source
    }

    /// Start a session. Idle sessions are evicted first.
    pub fn create(&self) -> Result<Arc<Session>, ExportError> {
        self.evict_idle(Instant::now());
        let controller = Controller::new(Arc::clone(&self.source), self.config.clone());
        let session = Arc::new(Session::new(Uuid::new_v4(), controller)?);
        lock(&self.sessions).insert(session.id(), Arc::clone(&session));
        log::info!("session {} created", session.id());
        Ok(session)
    }

    /// Look a session up and mark it as seen.
    pub fn get(&self, id: &Uuid) -> Option<Arc<Session>> {
        let session = lock(&self.sessions).get(id).cloned()?;
        session.touch();
        Some(session)
    }

    /// Drop sessions idle for longer than the ttl as of `now`.
    pub fn evict_idle(&self, now: Instant) -> usize {
        let mut sessions = lock(&self.sessions);
        let before = sessions.len();
        sessions.retain(|_, s| s.idle_at(now) <= self.ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            log::info!("evicted {} idle sessions", evicted);
        }
        evicted
    }

    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

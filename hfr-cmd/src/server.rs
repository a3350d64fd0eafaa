//! HTTP server and API handlers for the wave dashboard.
//!
//! - `GET /` and `GET /assets/dashboard.js` serve the page.
//! - `GET /api/config` and `GET /api/sites` feed the controls.
//! - `/api/sessions/...` drives one session's controller.

use crate::ServeArgs;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use hfr_chart::assets::{DASHBOARD_JS, INDEX_HTML};
use hfr_chart::export::{ExportError, EXPORT_FILENAME};
use hfr_chart::session::{Session, SessionRegistry};
use hfr_chart::view::{DashboardView, PolarPanels};
use hfr_db::{DataAccessError, ObservationSource};
use hfr_utils::dates;
use hfr_wave::{Selection, Site, SiteOption, WaveConfig, WindowError, WindowRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Application state shared across handlers.
pub struct AppState {
    pub sessions: SessionRegistry,
    /// Selector options, enumerated once at startup.
    pub sites: Vec<SiteOption>,
}

impl AppState {
    pub fn new(
        source: Arc<dyn ObservationSource>,
        config: WaveConfig,
        session_ttl: Duration,
    ) -> Result<Self, DataAccessError> {
        let sites = Site::options(&source.query_sites()?);
        log::info!("{} sites available", sites.len());
        Ok(AppState {
            sessions: SessionRegistry::new(source, config, session_ttl),
            sites,
        })
    }

    fn session(&self, id: Uuid) -> Result<Arc<Session>, ApiError> {
        self.sessions.get(&id).ok_or(ApiError::UnknownSession(id))
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown session {0}")]
    UnknownSession(Uuid),

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error("invalid timestamp {0:?}")]
    Timestamp(String),

    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UnknownSession(_) => StatusCode::NOT_FOUND,
            ApiError::Window(_) | ApiError::Timestamp(_) => StatusCode::BAD_REQUEST,
            ApiError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            log::error!("request failed: {}", self);
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/assets/dashboard.js", get(script_handler))
        .route("/api/health", get(health_handler))
        .route("/api/config", get(config_handler))
        .route("/api/sites", get(sites_handler))
        .route("/api/sessions", post(create_session_handler))
        .route("/api/sessions/:id/query", post(query_handler))
        .route("/api/sessions/:id/refresh", post(refresh_handler))
        .route("/api/sessions/:id/hover", post(hover_handler))
        .route("/api/sessions/:id/dashboard", get(dashboard_handler))
        .route("/api/sessions/:id/export.csv", get(export_handler))
        .with_state(state)
}

/// Open the store, serve until Ctrl+C, then close the store.
pub async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let db = args.store.open()?;
    let config = WaveConfig {
        refresh_interval_secs: args.refresh_secs,
        ..args.store.wave_config()
    };
    let source: Arc<dyn ObservationSource> = Arc::new(db.clone());
    let state = Arc::new(AppState::new(
        source,
        config,
        Duration::from_secs(args.session_ttl_secs),
    )?);

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    log::info!("dashboard running at http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("server stopped");
    db.close()?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for Ctrl+C: {}", e);
    }
}

// --- Handlers ---

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        DASHBOARD_JS,
    )
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Settings the page needs for its controls and timer.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ConfigResponse {
    pub refresh_interval_secs: u64,
    pub earliest_date: String,
    pub latest_date: String,
    pub fallback_site_id: i64,
    pub window_days: i64,
}

async fn config_handler(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    let config = state.sessions.config();
    let today: NaiveDate = Local::now().date_naive();
    Json(ConfigResponse {
        refresh_interval_secs: config.refresh_interval_secs,
        earliest_date: dates::format_date(&config.earliest_date),
        latest_date: dates::format_date(&today),
        fallback_site_id: config.fallback_site_id,
        window_days: config.window_days,
    })
}

async fn sites_handler(State(state): State<Arc<AppState>>) -> Json<Vec<SiteOption>> {
    Json(state.sites.clone())
}

#[derive(Debug, Serialize)]
struct SessionCreated {
    id: Uuid,
    view: DashboardView,
}

/// New session, loaded with the default window.
async fn create_session_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionCreated>, ApiError> {
    let session = state.sessions.create()?;
    session.controller().refresh().await;
    Ok(Json(SessionCreated {
        id: session.id(),
        view: session.view()?,
    }))
}

async fn query_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<WindowRequest>,
) -> Result<Json<DashboardView>, ApiError> {
    let session = state.session(id)?;
    session.controller().submit(request).await?;
    Ok(Json(session.view()?))
}

async fn refresh_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardView>, ApiError> {
    let session = state.session(id)?;
    session.controller().refresh().await;
    Ok(Json(session.view()?))
}

#[derive(Debug, Default, Deserialize)]
pub struct HoverRequest {
    #[serde(default)]
    pub timestamp: Option<String>,
}

async fn hover_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<HoverRequest>,
) -> Result<Json<PolarPanels>, ApiError> {
    let session = state.session(id)?;
    let selection = match request.timestamp.as_deref().map(str::trim) {
        None | Some("") => Selection::none(),
        Some(value) => dates::parse_datetime(value)
            .map(Selection::at)
            .map_err(|_| ApiError::Timestamp(value.to_string()))?,
    };
    session.controller().select(selection);
    Ok(Json(session.polar_view()?))
}

async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardView>, ApiError> {
    let session = state.session(id)?;
    Ok(Json(session.view()?))
}

async fn export_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let session = state.session(id)?;
    let csv = session.export_csv()?;
    let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILENAME);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}

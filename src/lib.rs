pub mod error;
pub mod format;
pub mod geo;
pub mod handlers;
pub mod ical;
pub mod models;
pub mod openapi;
pub mod preferences;
pub mod schedule;
pub mod settings;
pub mod store;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use handlers::{
    create_enrollment, get_hoop, get_ical, get_preferences, healthz_live, healthz_ready,
    list_hoops, put_preferences, root,
};
use tower_http::LatencyUnit;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ical::CalendarExporter;
use crate::openapi::ApiDoc;
use crate::preferences::PreferencesStore;
use crate::settings::Settings;
use crate::store::HoopStore;

#[derive(Clone)]
pub struct AppState {
    pub(crate) settings: Settings,
    pub(crate) hoops: Arc<HoopStore>,
    pub(crate) preferences: Arc<PreferencesStore>,
    pub(crate) exporter: Arc<CalendarExporter>,
}

impl AppState {
    pub fn new(settings: Settings, hoops: HoopStore, preferences: PreferencesStore) -> Self {
        Self {
            settings,
            hoops: Arc::new(hoops),
            preferences: Arc::new(preferences),
            exporter: Arc::new(CalendarExporter::new()),
        }
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let preferences = PreferencesStore::load(&settings.preferences_path).await;
    let state = AppState::new(settings.clone(), HoopStore::default(), preferences);

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!(timezone = %settings.timezone, "Starting Hoopfinder API on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/hoops", get(list_hoops))
        .route("/hoops/{id}", get(get_hoop))
        .route("/hoops/{id}/enrollments", post(create_enrollment))
        .route("/hoops/{id}/enrollments.ics", get(get_ical))
        .route("/preferences", get(get_preferences).put(put_preferences))
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(CorsLayer::permissive()).layer(trace_layer)
}

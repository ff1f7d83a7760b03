//! HTTP surface of the dashboard.
//!
//! A single listener serves the page and the JSON endpoints the page calls
//! whenever a control changes. Every request reads the shared, immutable
//! dataset and computes a fresh figure; no per-request state survives.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::aggregate::{proportion, scatter};
use crate::config::{Config, ServerConfig};
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::record::{PayloadRange, SiteSelection};
use crate::view::DashboardLayout;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Route the page loads the charting library from.
pub const PLOTLY_JS_ROUTE: &str = "/assets/plotly.min.js";

/// Public build of the charting library, used when no local copy is
/// configured.
pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// State shared by all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    dataset: Arc<Dataset>,
    layout: Arc<DashboardLayout>,
    plotly_js: Option<Bytes>,
}

impl AppState {
    /// Build the handler state from a loaded dataset.
    #[must_use]
    pub fn new(dataset: Dataset, config: &Config) -> Self {
        let layout = DashboardLayout::new(&dataset, &config.controls);
        Self {
            dataset: Arc::new(dataset),
            layout: Arc::new(layout),
            plotly_js: None,
        }
    }

    /// Serve this script at [`PLOTLY_JS_ROUTE`] instead of redirecting to
    /// the CDN.
    #[must_use]
    pub fn with_plotly_js(mut self, script: impl Into<Bytes>) -> Self {
        self.plotly_js = Some(script.into());
        self
    }

    /// The dataset served by this instance.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Whether a selection can match any record: `ALL`, or a site present
    /// in the dataset.
    #[must_use]
    pub fn knows(&self, site: &SiteSelection) -> bool {
        site.site_name()
            .map_or(true, |name| self.dataset.has_site(name))
    }
}

/// Query parameters of the proportion chart endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PieQuery {
    /// Site selection, `ALL` when absent.
    #[serde(default)]
    pub site: SiteSelection,
}

/// Query parameters of the scatter chart endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ScatterQuery {
    /// Site selection, `ALL` when absent.
    #[serde(default)]
    pub site: SiteSelection,
    /// Lower payload bound, dataset minimum when absent.
    pub low: Option<f64>,
    /// Upper payload bound, dataset maximum when absent.
    pub high: Option<f64>,
}

impl ScatterQuery {
    /// Resolve the requested interval against the dataset bounds.
    #[must_use]
    pub fn range(&self, bounds: PayloadRange) -> PayloadRange {
        PayloadRange::new(
            self.low.unwrap_or(bounds.low),
            self.high.unwrap_or(bounds.high),
        )
    }
}

/// Build the dashboard router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(PLOTLY_JS_ROUTE, get(plotly_js))
        .route("/api/layout", get(layout))
        .route("/api/figures/success-pie", get(success_pie))
        .route("/api/figures/payload-scatter", get(payload_scatter))
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
/// while running.
pub async fn serve(config: &Config, dataset: Dataset) -> Result<()> {
    let address = config.bind_address();
    let mut state = AppState::new(dataset, config);
    if let Some(script) = load_plotly_js(&config.server).await? {
        state = state.with_plotly_js(script);
    }

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| Error::ServerBind {
            address: address.clone(),
            source,
        })?;
    info!("Dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Dashboard stopped");
    Ok(())
}

/// Read the configured local copy of the charting library, if any.
///
/// # Errors
///
/// Returns [`Error::AssetRead`] if a path is configured but cannot be read.
pub async fn load_plotly_js(server: &ServerConfig) -> Result<Option<Bytes>> {
    let Some(path) = &server.plotly_js else {
        debug!(url = PLOTLY_CDN_URL, "no local plotly.js configured, using CDN");
        return Ok(None);
    };
    let script = tokio::fs::read(path)
        .await
        .map_err(|source| Error::AssetRead {
            path: path.clone(),
            source,
        })?;
    info!(path = %path.display(), bytes = script.len(), "Loaded local plotly.js");
    Ok(Some(Bytes::from(script)))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn plotly_js(State(state): State<AppState>) -> Response {
    match state.plotly_js {
        Some(script) => ([(header::CONTENT_TYPE, "text/javascript")], script).into_response(),
        None => Redirect::temporary(PLOTLY_CDN_URL).into_response(),
    }
}

async fn layout(State(state): State<AppState>) -> Json<DashboardLayout> {
    Json(state.layout.as_ref().clone())
}

async fn success_pie(
    State(state): State<AppState>,
    Query(query): Query<PieQuery>,
) -> Json<Figure> {
    let aggregate = proportion(&state.dataset, &query.site);
    debug!(
        site = %query.site,
        known_site = state.knows(&query.site),
        slices = aggregate.slices.len(),
        "computed success pie"
    );
    Json(Figure::from(&aggregate))
}

async fn payload_scatter(
    State(state): State<AppState>,
    Query(query): Query<ScatterQuery>,
) -> Json<Figure> {
    let range = query.range(state.dataset.payload_bounds());
    let aggregate = scatter(&state.dataset, &query.site, range);
    debug!(
        site = %query.site,
        known_site = state.knows(&query.site),
        low = range.low,
        high = range.high,
        points = aggregate.len(),
        "computed payload scatter"
    );
    Json(Figure::from(&aggregate))
}

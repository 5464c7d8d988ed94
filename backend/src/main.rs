use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use corrosion_core::chemistry::{ChemistryError, Substance, SUBSTANCES};
use corrosion_core::{Composition, MapError, Maps, StandardMaps};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

const ADDR_VAR: &str = "CORROSION_MAPS_ADDR";

struct AppState {
    maps: StandardMaps,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let maps = StandardMaps::new()?;
    let shared_state = Arc::new(AppState { maps });

    let app = Router::new()
        .route("/", get(root))
        .route("/maps", get(maps_handler))
        .route("/reactions", get(reactions_handler))
        .route("/substances", get(substances_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state);

    let addr = listen_addr(std::env::var(ADDR_VAR).ok().as_deref());
    info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn listen_addr(configured: Option<&str>) -> SocketAddr {
    let fallback = SocketAddr::from(([127, 0, 0, 1], 3000));
    match configured.map(str::parse::<SocketAddr>) {
        Some(Ok(addr)) => addr,
        Some(Err(e)) => {
            warn!("Ignoring {}: {}", ADDR_VAR, e);
            fallback
        }
        None => fallback,
    }
}

async fn root() -> &'static str {
    "Corrosion maps backend running"
}

/// JSON error body `{code, message}` with an HTTP status.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }
}

impl From<MapError> for ApiError {
    fn from(e: MapError) -> Self {
        match e {
            MapError::Chemistry(ChemistryError::OutOfDomain { .. }) => {
                Self::new(StatusCode::BAD_REQUEST, "OUT_OF_DOMAIN", e.to_string())
            }
            other => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "MAP_FAILED",
                other.to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "code": self.code, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct MapsQuery {
    /// Sulphur [mM]
    s: f64,
    /// Nitrogen [mM]
    n: f64,
    /// CO2 [mM]
    c: f64,
    /// Temperature [K]
    t: f64,
}

impl MapsQuery {
    fn composition(&self) -> Composition {
        Composition::new(self.s, self.n, self.c, self.t)
    }
}

async fn maps_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MapsQuery>,
) -> Result<Json<Maps>, ApiError> {
    let p = query.composition();
    // Reject before paying for a blocking task
    state
        .maps
        .domain()
        .check(&p)
        .map_err(|e| ApiError::from(MapError::from(e)))?;

    let worker = state.clone();
    let maps = tokio::task::spawn_blocking(move || worker.maps.compute(&p))
        .await
        .map_err(|e| {
            warn!("Map task aborted: {}", e);
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "TASK_FAILED", e.to_string())
        })?
        .map_err(|e| {
            warn!("Map computation failed: {}", e);
            ApiError::from(e)
        })?;

    info!(
        s = p.sulfur,
        n = p.nitrogen,
        c = p.co2,
        t = p.temperature,
        "Computed maps"
    );
    Ok(Json(maps))
}

#[derive(Debug, Serialize)]
struct ReactionSummary {
    key: String,
    equation: String,
    drg: f64,
    drh: f64,
    drcp: f64,
    k_298: f64,
}

async fn reactions_handler(State(state): State<Arc<AppState>>) -> Json<Vec<ReactionSummary>> {
    let summaries = state
        .maps
        .reactions()
        .iter()
        .filter_map(|r| match r.thermo() {
            Ok(thermo) => Some(ReactionSummary {
                key: r.key.clone(),
                equation: r.equation.clone(),
                drg: thermo.drg,
                drh: thermo.drh,
                drcp: thermo.drcp,
                k_298: thermo.k_chi_298(),
            }),
            Err(e) => {
                warn!("Skipping reaction {}: {}", r.key, e);
                None
            }
        })
        .collect();
    Json(summaries)
}

async fn substances_handler() -> Json<&'static [Substance]> {
    Json(SUBSTANCES)
}

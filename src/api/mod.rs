//! REST API for sizing results and reference data.
//!
//! Provides three endpoints:
//! - `GET /state`: the scenario the server was started with, and its result
//! - `POST /sizing`: sizes a system for the posted inputs
//! - `GET /catalog`: appliances, regions, panels, and inverters

mod handlers;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::appliances::ApplianceLoad;
use crate::config::ResolvedScenario;
use crate::sizing::engine::{SizingInput, compute_sizing};
use crate::sizing::types::{CalculationResult, InputMode, InverterOption, SizingConfig};

/// Immutable application state shared across all request handlers.
///
/// Constructed once at startup and wrapped in `Arc`; all data is read-only.
pub struct AppState {
    pub mode: InputMode,
    pub monthly_bill: f64,
    pub config: SizingConfig,
    pub loads: Vec<ApplianceLoad>,
    /// Result for the startup scenario.
    pub result: CalculationResult,
    /// Catalog every `POST /sizing` request is sized against.
    pub inverters: Vec<InverterOption>,
}

impl AppState {
    /// Sizes `scenario` once and keeps inputs and result.
    pub fn new(scenario: ResolvedScenario, inverters: Vec<InverterOption>) -> Self {
        let loads = scenario.appliances.into_loads();
        let result = compute_sizing(&SizingInput {
            mode: scenario.mode,
            loads: &loads,
            monthly_bill: scenario.monthly_bill,
            config: &scenario.sizing,
            inverters: &inverters,
        });
        Self {
            mode: scenario.mode,
            monthly_bill: scenario.monthly_bill,
            config: scenario.sizing,
            loads,
            result,
            inverters,
        }
    }
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/sizing", post(handlers::post_sizing))
        .route("/catalog", get(handlers::get_catalog))
        .with_state(state)
}

/// Binds to the given address and serves the API until shutdown.
///
/// # Errors
///
/// Returns an `io::Error` if the TCP listener cannot bind to `addr` or the
/// server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{addr}");
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}

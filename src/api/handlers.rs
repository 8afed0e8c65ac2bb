//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::debug;

use super::AppState;
use super::types::{CatalogResponse, ErrorResponse, SizingRequest, StateResponse};
use crate::catalog;
use crate::sizing::engine::{SizingInput, compute_sizing};
use crate::sizing::types::CalculationResult;

/// Returns the server's scenario inputs and result.
///
/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    Json(StateResponse {
        mode: state.mode,
        monthly_bill: state.monthly_bill,
        config: state.config.clone(),
        appliances: state.loads.clone(),
        result: state.result.clone(),
    })
}

/// Sizes a system for the posted inputs against the server's inverter catalog.
///
/// `POST /sizing` → 200 + `CalculationResult` JSON
/// invalid configuration → 400 + `ErrorResponse`
pub async fn post_sizing(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SizingRequest>,
) -> Result<Json<CalculationResult>, (StatusCode, Json<ErrorResponse>)> {
    let resolved = request.into_scenario().resolve().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
                field: Some(e.field),
            }),
        )
    })?;

    let result = compute_sizing(&SizingInput {
        mode: resolved.mode,
        loads: resolved.appliances.loads(),
        monthly_bill: resolved.monthly_bill,
        config: &resolved.sizing,
        inverters: &state.inverters,
    });
    debug!("POST /sizing -> {} kWp", result.required_system_size_kwp);

    Ok(Json(result))
}

/// Returns the built-in reference catalogs.
///
/// `GET /catalog` → 200 + `CatalogResponse` JSON
pub async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        appliances: catalog::appliances(),
        regions: catalog::REGIONS,
        panels: catalog::PANEL_OPTIONS,
        inverters: state.inverters.clone(),
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::config::ScenarioConfig;

    fn make_test_state() -> Arc<AppState> {
        let resolved = ScenarioConfig::family_home().resolve().unwrap();
        Arc::new(AppState::new(resolved, catalog::inverters()))
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/sizing")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn state_returns_200() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/state")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert!(json.get("config").is_some());
        assert!(json.get("result").is_some());
        assert_eq!(json["appliances"].as_array().map(Vec::len), Some(7));
    }

    #[tokio::test]
    async fn sizing_computes_result() {
        let app = router(make_test_state());

        let req = post(r#"{"appliances":[{"id":"custom_0","name":"Heater","watts":1000.0,"hours_per_day":5.0}]}"#);
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["required_system_size_kwp"], 1.4);
        assert_eq!(json["number_of_panels"], 3);
        assert_eq!(json["recommended_inverter"]["phase_type"], "1-Phase");
    }

    #[tokio::test]
    async fn invalid_efficiency_returns_400() {
        let app = router(make_test_state());

        let resp = app
            .oneshot(post(r#"{"config":{"system_efficiency":1.5}}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["field"], "sizing.system_efficiency");
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn catalog_lists_reference_data() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/catalog")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["appliances"].as_array().map(Vec::len), Some(16));
        assert_eq!(json["regions"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["panels"].as_array().map(Vec::len), Some(6));
        assert_eq!(json["inverters"].as_array().map(Vec::len), Some(11));
    }
}

//! HTTP transport: `/forecast` and `/health`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use common::{Error, ForecastRecord};
use forecast_cache::ForecastService;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ForecastService>,
}

/// Both routes answer every method, not just GET.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/forecast", any(get_forecast))
        .route("/health", any(health))
        .with_state(state)
}

/// Query string of `/forecast`.
#[derive(Debug, Default, Deserialize)]
pub struct ForecastParams {
    #[serde(rename = "spotId")]
    pub spot_id: Option<String>,
    #[serde(rename = "bypassCache")]
    pub bypass_cache: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing spotId parameter")]
    MissingSpotId,

    #[error(transparent)]
    Service(#[from] Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingSpotId => StatusCode::BAD_REQUEST,
            ApiError::Service(Error::Forecast { .. }) => StatusCode::BAD_GATEWAY,
            ApiError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Forecast request failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}

/// Interpret the `bypassCache` parameter.
///
/// Accepts the usual spellings of true and false; anything else means
/// `false` rather than an error.
pub fn parse_bypass_flag(raw: &str) -> bool {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => true,
        "0" | "f" | "F" | "false" | "FALSE" | "False" => false,
        other => {
            debug!(value = other, "Ignoring unparseable bypassCache");
            false
        }
    }
}

/// /forecast?spotId=..&bypassCache=..
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(params): Query<ForecastParams>,
) -> Result<Json<ForecastRecord>, ApiError> {
    let spot_id = params
        .spot_id
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingSpotId)?;
    let bypass_cache = params
        .bypass_cache
        .as_deref()
        .is_some_and(parse_bypass_flag);

    let record = state.service.get_forecast(&spot_id, bypass_cache).await?;
    Ok(Json(record))
}

/// /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::http::Uri;
    use common::{Clock, ForecastSource, ManualClock};
    use forecast_cache::ForecastCache;
    use spot_registry::MockForecaster;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const MALIBU: &str = "5842041f4e65fad6a7708814";

    struct BrokenSource;

    #[async_trait]
    impl ForecastSource for BrokenSource {
        async fn compute(&self, spot_id: &str) -> common::Result<ForecastRecord> {
            Err(Error::forecast(spot_id, "provider timed out"))
        }
    }

    fn mock_state() -> (Arc<ManualClock>, AppState) {
        let clock = Arc::new(ManualClock::new(0));
        let clock_dyn: Arc<dyn Clock> = clock.clone();
        let source = Arc::new(MockForecaster::new(clock_dyn.clone()));
        let service = ForecastService::new(ForecastCache::new(), source, clock_dyn);
        (
            clock,
            AppState {
                service: Arc::new(service),
            },
        )
    }

    fn params(spot_id: Option<&str>, bypass: Option<&str>) -> Query<ForecastParams> {
        Query(ForecastParams {
            spot_id: spot_id.map(String::from),
            bypass_cache: bypass.map(String::from),
        })
    }

    /// Serve `app` on an ephemeral port and send one raw HTTP/1.1 request.
    async fn roundtrip(app: Router, method: &str, target: &str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "{method} {target} HTTP/1.1\r\nHost: {addr}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
        );
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[test]
    fn test_parse_bypass_flag() {
        for raw in ["1", "t", "T", "true", "TRUE", "True"] {
            assert!(parse_bypass_flag(raw), "{raw} should be true");
        }
        for raw in ["0", "f", "false", "False", "", "yes", "tru", " true"] {
            assert!(!parse_bypass_flag(raw), "{raw:?} should be false");
        }
    }

    #[test]
    fn test_query_string_names() {
        let uri: Uri = format!("/forecast?spotId={MALIBU}&bypassCache=true")
            .parse()
            .unwrap();
        let Query(parsed) = Query::<ForecastParams>::try_from_uri(&uri).unwrap();

        assert_eq!(parsed.spot_id.as_deref(), Some(MALIBU));
        assert_eq!(parsed.bypass_cache.as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn test_missing_spot_id_is_bad_request() {
        let (_clock, state) = mock_state();

        for query in [params(None, None), params(Some(""), Some("true"))] {
            let err = get_forecast(State(state.clone()), query).await.unwrap_err();
            assert!(matches!(err, ApiError::MissingSpotId));
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
        assert!(state.service.cache().is_empty());
    }

    #[tokio::test]
    async fn test_forecast_served_then_cached() {
        let (clock, state) = mock_state();

        let Json(first) = get_forecast(State(state.clone()), params(Some(MALIBU), None))
            .await
            .unwrap();
        assert_eq!(first.location, "Malibu, CA");

        clock.advance(10);
        // An unparseable flag behaves like no bypass.
        let Json(second) = get_forecast(State(state.clone()), params(Some(MALIBU), Some("maybe")))
            .await
            .unwrap();
        assert_eq!(second, first);

        let Json(third) = get_forecast(State(state), params(Some(MALIBU), Some("true")))
            .await
            .unwrap();
        assert_eq!(third.generated_at, 10);
    }

    #[tokio::test]
    async fn test_computation_failure_is_bad_gateway() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(0));
        let service = ForecastService::new(ForecastCache::new(), Arc::new(BrokenSource), clock);
        let state = AppState {
            service: Arc::new(service),
        };

        let err = get_forecast(State(state.clone()), params(Some(MALIBU), None))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
        assert!(state.service.cache().is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_routes_accept_any_method() {
        let (_clock, state) = mock_state();
        let app = router(state);

        let health = roundtrip(app.clone(), "POST", "/health").await;
        assert!(health.starts_with("HTTP/1.1 200"), "{health}");
        assert!(health.contains(r#"{"status":"ok"}"#));

        let forecast = roundtrip(app.clone(), "POST", &format!("/forecast?spotId={MALIBU}")).await;
        assert!(forecast.starts_with("HTTP/1.1 200"), "{forecast}");
        assert!(forecast.contains("Malibu, CA"));

        let missing = roundtrip(app, "GET", "/forecast").await;
        assert!(missing.starts_with("HTTP/1.1 400"), "{missing}");
        assert!(missing.contains("Missing spotId parameter"));
    }
}

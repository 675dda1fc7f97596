//! HTTP handlers for the multiweather service.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::warn;

use crate::server::AppState;

/// Response body for a successful temperature query.
#[derive(Debug, Serialize)]
pub struct WeatherReport {
    pub city: String,
    /// Average reading across all providers, in Kelvin.
    pub temp: f64,
    /// Wall-clock duration of the aggregate provider query.
    pub took: String,
}

/// GET /weather/{city}
///
/// The city is everything after the second path separator, so
/// `/weather/New/York` queries for "New/York".
pub async fn weather(State(state): State<AppState>, Path(city): Path<String>) -> Response {
    if city.is_empty() {
        return missing_city().await.into_response();
    }

    let begin = Instant::now();
    match state.providers.temperature(&city).await {
        Ok(temp) => {
            let report = WeatherReport {
                city,
                temp,
                took: format!("{:?}", begin.elapsed()),
            };
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(err) => {
            warn!(%city, "temperature query failed: {err:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}")).into_response()
        }
    }
}

/// GET /weather and /weather/ — the city segment is required.
pub async fn missing_city() -> (StatusCode, &'static str) {
    (StatusCode::BAD_REQUEST, "missing city in request path")
}

/// GET /hello
pub async fn hello() -> &'static str {
    "hello!"
}

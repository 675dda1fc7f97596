use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::TemperatureProvider;

const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org";

/// Client for the OpenWeatherMap current-weather API.
///
/// The remote reports temperature in Kelvin already, so readings pass
/// through unconverted.
#[derive(Debug, Clone)]
pub struct OpenWeatherMapProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherMapProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different host, e.g. a local test double.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl TemperatureProvider for OpenWeatherMapProvider {
    async fn temperature(&self, city: &str) -> Result<f64> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("APPID", self.api_key.as_str()), ("q", city)])
            .send()
            .await
            .context("Failed to send request to OpenWeatherMap")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeatherMap response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeatherMap request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let kelvin = decode_current(&body)?;
        debug!(%city, kelvin, "openweathermap reading");
        Ok(kelvin)
    }
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    main: OwmMain,
}

fn decode_current(body: &str) -> Result<f64> {
    let parsed: OwmCurrentResponse =
        serde_json::from_str(body).context("Failed to parse OpenWeatherMap JSON")?;
    Ok(parsed.main.temp)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

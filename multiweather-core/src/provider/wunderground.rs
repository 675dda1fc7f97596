use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::model::celsius_to_kelvin;

use super::TemperatureProvider;

const DEFAULT_BASE_URL: &str = "http://api.wunderground.com";

/// Client for the Weather Underground conditions API.
///
/// The remote reports temperature in Celsius; readings are converted to
/// Kelvin before being returned.
#[derive(Debug, Clone)]
pub struct WeatherUndergroundProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherUndergroundProvider {
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
impl TemperatureProvider for WeatherUndergroundProvider {
    async fn temperature(&self, city: &str) -> Result<f64> {
        // the key and city are path segments here, not query parameters
        let url = format!(
            "{}/api/{}/conditions/q/{}.json",
            self.base_url, self.api_key, city
        );

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to send request to Weather Underground")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Weather Underground response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Weather Underground request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let kelvin = decode_current(&body)?;
        debug!(%city, kelvin, "wunderground reading");
        Ok(kelvin)
    }
}

#[derive(Debug, Deserialize)]
struct WuObservation {
    temp_c: f64,
}

#[derive(Debug, Deserialize)]
struct WuConditionsResponse {
    current_observation: WuObservation,
}

fn decode_current(body: &str) -> Result<f64> {
    let parsed: WuConditionsResponse =
        serde_json::from_str(body).context("Failed to parse Weather Underground JSON")?;
    Ok(celsius_to_kelvin(parsed.current_observation.temp_c))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn decode_converts_celsius_to_kelvin() {
        let body = r#"{"current_observation":{"temp_c":0.0}}"#;
        assert_eq!(decode_current(body).unwrap(), 273.15);

        let body = r#"{"current_observation":{"temp_c":26.85}}"#;
        let kelvin = decode_current(body).unwrap();
        assert!((kelvin - 300.0).abs() < 1e-9);
    }

    #[test]
    fn decode_rejects_unexpected_shape() {
        let err = decode_current(r#"{"response":{"error":"keynotfound"}}"#).unwrap_err();
        assert!(err.to_string().contains("Failed to parse Weather Underground"));
    }

    #[tokio::test]
    async fn fetches_reading_from_remote() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/KEY/conditions/q/Tokyo.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current_observation": { "temp_c": 16.85 }
            })))
            .mount(&server)
            .await;

        let provider = WeatherUndergroundProvider::with_base_url("KEY".into(), server.uri());
        let kelvin = provider.temperature("Tokyo").await.unwrap();
        assert!((kelvin - 290.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn city_is_embedded_verbatim_in_the_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/KEY/conditions/q/New/York.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current_observation": { "temp_c": 0.0 }
            })))
            .mount(&server)
            .await;

        let provider = WeatherUndergroundProvider::with_base_url("KEY".into(), server.uri());
        let kelvin = provider.temperature("New/York").await.unwrap();
        assert_eq!(kelvin, 273.15);
    }

    #[tokio::test]
    async fn surfaces_remote_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/BAD/conditions/q/Tokyo.json"))
            .respond_with(ResponseTemplate::new(403).set_body_string("this key does not exist"))
            .mount(&server)
            .await;

        let provider = WeatherUndergroundProvider::with_base_url("BAD".into(), server.uri());
        let err = provider.temperature("Tokyo").await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("this key does not exist"));
    }

    #[tokio::test]
    async fn surfaces_transport_error() {
        let provider =
            WeatherUndergroundProvider::with_base_url("KEY".into(), "http://127.0.0.1:9".into());
        let err = provider.temperature("Tokyo").await.unwrap_err();
        assert!(err.to_string().contains("Failed to send request"));
    }
}

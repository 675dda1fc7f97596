use crate::{
    config::ProviderEntry,
    provider::{openweathermap::OpenWeatherMapProvider, wunderground::WeatherUndergroundProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod openweathermap;
pub mod wunderground;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeatherMap,
    WeatherUnderground,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeatherMap => "openweathermap",
            ProviderId::WeatherUnderground => "wunderground",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeatherMap, ProviderId::WeatherUnderground]
    }

    /// Environment variable consulted for this provider's API key.
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderId::OpenWeatherMap => "OPENWEATHERMAP_API_KEY",
            ProviderId::WeatherUnderground => "WUNDERGROUND_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweathermap" => Ok(ProviderId::OpenWeatherMap),
            "wunderground" => Ok(ProviderId::WeatherUnderground),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweathermap, wunderground."
            )),
        }
    }
}

/// A single external temperature source.
///
/// One invocation performs one outbound HTTP call and yields one reading,
/// normalized to Kelvin.
#[async_trait]
pub trait TemperatureProvider: Send + Sync + Debug {
    async fn temperature(&self, city: &str) -> anyhow::Result<f64>;
}

/// Construct a provider client from one configuration entry.
pub fn provider_from_entry(entry: &ProviderEntry) -> anyhow::Result<Box<dyn TemperatureProvider>> {
    let id = ProviderId::try_from(entry.kind.as_str())?;

    let api_key = entry.api_key.clone().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: set `api_key` in the config file or export {}.",
            id.env_var()
        )
    })?;

    let boxed: Box<dyn TemperatureProvider> = match (id, entry.base_url.clone()) {
        (ProviderId::OpenWeatherMap, None) => Box::new(OpenWeatherMapProvider::new(api_key)),
        (ProviderId::OpenWeatherMap, Some(url)) => {
            Box::new(OpenWeatherMapProvider::with_base_url(api_key, url))
        }
        (ProviderId::WeatherUnderground, None) => {
            Box::new(WeatherUndergroundProvider::new(api_key))
        }
        (ProviderId::WeatherUnderground, Some(url)) => {
            Box::new(WeatherUndergroundProvider::with_base_url(api_key, url))
        }
    };

    Ok(boxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: &str, api_key: Option<&str>) -> ProviderEntry {
        ProviderEntry {
            kind: kind.to_string(),
            api_key: api_key.map(str::to_string),
            base_url: None,
        }
    }

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn provider_from_entry_errors_when_missing_api_key() {
        let err = provider_from_entry(&entry("openweathermap", None)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("No API key configured for provider"));
        assert!(msg.contains("OPENWEATHERMAP_API_KEY"));
    }

    #[test]
    fn provider_from_entry_rejects_unknown_kind() {
        let err = provider_from_entry(&entry("doesnotexist", Some("KEY"))).unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn provider_from_entry_works_when_configured() {
        for id in ProviderId::all() {
            let provider = provider_from_entry(&entry(id.as_str(), Some("KEY")));
            assert!(provider.is_ok());
        }
    }
}

use anyhow::{Result, bail};

use crate::config::Config;
use crate::provider::{TemperatureProvider, provider_from_entry};

/// An ordered set of temperature providers queried as one unit.
///
/// Providers are queried sequentially in configuration order and the result
/// is the arithmetic mean of all readings. The first provider failure aborts
/// the whole query; a partial average is never returned.
#[derive(Debug)]
pub struct MultiProvider {
    providers: Vec<Box<dyn TemperatureProvider>>,
}

impl MultiProvider {
    /// Build from an explicit, non-empty provider list.
    pub fn new(providers: Vec<Box<dyn TemperatureProvider>>) -> Result<Self> {
        if providers.is_empty() {
            bail!("At least one temperature provider must be configured.");
        }

        Ok(Self { providers })
    }

    /// Build the provider list in the order given by `config.providers`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let providers = config
            .providers
            .iter()
            .map(provider_from_entry)
            .collect::<Result<Vec<_>>>()?;

        Self::new(providers)
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Average temperature for `city` across all providers, in Kelvin.
    pub async fn temperature(&self, city: &str) -> Result<f64> {
        let mut sum = 0.0;

        for provider in &self.providers {
            sum += provider.temperature(city).await?;
        }

        Ok(sum / self.providers.len() as f64)
    }
}

//! Core library for the `multiweather` service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over temperature providers
//! - The multi-provider aggregator
//!
//! It is used by `multiweather-server`, but can also be reused by other binaries or services.

pub mod aggregator;
pub mod config;
pub mod model;
pub mod provider;

pub use aggregator::MultiProvider;
pub use config::{Config, ProviderEntry, ServerConfig};
pub use model::celsius_to_kelvin;
pub use provider::{ProviderId, TemperatureProvider};

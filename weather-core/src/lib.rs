//! Core library for scraping current weather and the short forecast from the
//! MGM (Turkish State Meteorological Service) website.
//!
//! This crate defines:
//! - Location normalization and page address construction
//! - Browser rendering sessions with guaranteed teardown
//! - Per-field extraction with isolated failures
//! - The request-level error taxonomy and the provider entry point
//!
//! It is used by `mgm-weather-cli`, but can also be embedded in an HTTP
//! service that relays city/district queries.

pub mod config;
pub mod error;
pub mod extract;
pub mod location;
pub mod model;
pub mod provider;
pub mod session;

pub use config::{BrowserConfig, Config, ExtractOptions};
pub use error::{ExtractError, SessionError};
pub use model::{ForecastDay, LocationQuery, WeatherSnapshot};
pub use provider::{WeatherProvider, mgm::MgmProvider, provider_from_config};

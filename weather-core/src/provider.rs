use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    error::ExtractError,
    model::{LocationQuery, WeatherSnapshot},
    provider::mgm::MgmProvider,
    session::ChromeLauncher,
};

pub mod mgm;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, query: &LocationQuery) -> Result<WeatherSnapshot, ExtractError>;

    /// Validate raw input and fetch weather for it.
    async fn extract_weather(
        &self,
        city: &str,
        district: &str,
    ) -> Result<WeatherSnapshot, ExtractError> {
        let query = LocationQuery::new(city, district)?;
        self.get_weather(&query).await
    }
}

/// Construct the Chrome-backed provider from config.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let launcher = ChromeLauncher::new(config.browser.clone());
    Box::new(MgmProvider::new(launcher, config.extract_options()))
}

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::{
    config::ExtractOptions,
    error::{ExtractError, classify},
    extract::{extract_fields, extract_forecast},
    model::{LocationQuery, WeatherSnapshot},
    session::{SessionGuard, SessionLauncher},
};

use super::WeatherProvider;

/// Scrapes the MGM forecast page through a fresh browser session per call.
#[derive(Debug)]
pub struct MgmProvider<L> {
    launcher: Arc<L>,
    options: ExtractOptions,
}

impl<L: SessionLauncher + 'static> MgmProvider<L> {
    pub fn new(launcher: L, options: ExtractOptions) -> Self {
        Self { launcher: Arc::new(launcher), options }
    }
}

#[async_trait]
impl<L: SessionLauncher + 'static> WeatherProvider for MgmProvider<L> {
    async fn get_weather(&self, query: &LocationQuery) -> Result<WeatherSnapshot, ExtractError> {
        let launcher = Arc::clone(&self.launcher);
        let options = self.options.clone();
        let query = query.clone();

        // Browser automation blocks; keep it off the async workers.
        tokio::task::spawn_blocking(move || extract_blocking(launcher.as_ref(), &options, &query))
            .await
            .map_err(|e| ExtractError::Internal(format!("extraction worker failed: {e}")))?
    }
}

/// Run one complete extraction on the current thread.
///
/// The session is released before this returns, whatever the outcome.
pub fn extract_blocking(
    launcher: &dyn SessionLauncher,
    options: &ExtractOptions,
    query: &LocationQuery,
) -> Result<WeatherSnapshot, ExtractError> {
    let url = query.target_url(&options.base_url);
    info!(location = %query.label(), %url, "extracting weather");

    let result = render_and_extract(launcher, options, query, &url);
    if let Err(err) = &result {
        warn!(%url, error = %err, "weather extraction failed");
    }
    result
}

fn render_and_extract(
    launcher: &dyn SessionLauncher,
    options: &ExtractOptions,
    query: &LocationQuery,
    url: &str,
) -> Result<WeatherSnapshot, ExtractError> {
    let mut guard = SessionGuard::new(launcher.launch().map_err(|e| classify(e, url))?);

    guard.session_mut().navigate(url).map_err(|e| classify(e, url))?;
    guard.session().wait_until_document_ready(options.wait_timeout).map_err(|e| classify(e, url))?;

    let mut snapshot = WeatherSnapshot::for_location(query);
    extract_fields(guard.session(), &mut snapshot, options.wait_timeout);
    snapshot.forecast = extract_forecast(guard.session(), options.wait_timeout, &options.base_url);

    guard.release();
    Ok(snapshot)
}

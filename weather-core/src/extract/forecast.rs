use std::time::Duration;

use tracing::debug;

use crate::{
    error::SessionError,
    model::ForecastDay,
    session::{Locator, RenderedElement, RenderingSession},
};

use super::parse_decimal;

pub const FORECAST_TABLE: Locator = Locator::Css("div#_4_5gunluk table tbody");

/// Upper bound on rows read from the forecast table.
pub const MAX_FORECAST_DAYS: usize = 5;

const MIN_CELLS: usize = 4;

/// Read the multi-day forecast table. Any failure yields an empty forecast.
pub fn extract_forecast(
    session: &dyn RenderingSession,
    timeout: Duration,
    base_url: &str,
) -> Vec<ForecastDay> {
    read_forecast(session, timeout, base_url).unwrap_or_else(|err| {
        debug!(error = %err, "forecast left empty");
        Vec::new()
    })
}

fn read_forecast(
    session: &dyn RenderingSession,
    timeout: Duration,
    base_url: &str,
) -> Result<Vec<ForecastDay>, SessionError> {
    let body = session.wait_for_visible(&FORECAST_TABLE, timeout)?;

    let mut days = Vec::new();
    for row in body.find_all("tr")?.into_iter().take(MAX_FORECAST_DAYS) {
        let cells = row.find_all("td")?;
        if cells.len() < MIN_CELLS {
            continue;
        }
        days.push(read_day(&cells, base_url)?);
    }

    Ok(days)
}

fn read_day(
    cells: &[Box<dyn RenderedElement + '_>],
    base_url: &str,
) -> Result<ForecastDay, SessionError> {
    let condition_cell = &cells[1];
    let (condition, icon_url) = match condition_cell.find_all("img")?.first() {
        Some(img) => {
            let condition = match img.attribute("title")? {
                Some(title) => title.trim().to_string(),
                None => condition_cell.text()?.trim().to_string(),
            };
            let src = img.attribute("src")?.unwrap_or_default();
            (condition, resolve_icon_url(src.trim(), base_url))
        }
        None => (condition_cell.text()?.trim().to_string(), String::new()),
    };

    Ok(ForecastDay {
        day: cells[0].text()?.trim().to_string(),
        condition,
        icon_url,
        min_temp: parse_decimal(&cells[2].text()?),
        max_temp: parse_decimal(&cells[3].text()?),
    })
}

/// Turn a `../`-relative icon path into an absolute address on `base_url`.
/// Anything else is returned unchanged.
pub fn resolve_icon_url(src: &str, base_url: &str) -> String {
    if !src.starts_with("../") {
        return src.to_string();
    }

    let mut rest = src;
    while let Some(stripped) = rest.strip_prefix("../") {
        rest = stripped;
    }

    format!("{}/{}", base_url.trim_end_matches('/'), rest)
}

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// A city/district pair as typed by the caller.
///
/// Both parts are non-empty after trimming; [`LocationQuery::new`] is the only
/// way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    city: String,
    district: String,
}

impl LocationQuery {
    pub fn new(city: impl Into<String>, district: impl Into<String>) -> Result<Self, ExtractError> {
        let city = city.into();
        let district = district.into();

        if city.trim().is_empty() || district.trim().is_empty() {
            return Err(ExtractError::InvalidInput(
                "city and district must both be provided".to_string(),
            ));
        }

        Ok(Self { city, district })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn district(&self) -> &str {
        &self.district
    }

    /// Display label built from the raw input, e.g. `Trabzon/Merkez`.
    pub fn label(&self) -> String {
        format!("{}/{}", self.city, self.district)
    }
}

/// Current conditions plus the short forecast for one location.
///
/// Every measured value is optional: `None` means the field could not be
/// read from the page, not that the request failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub location: String,
    pub temp: Option<f64>,
    pub condition: String,
    pub humidity: Option<f64>,
    pub wind: Option<f64>,
    pub pressure: Option<f64>,
    pub forecast: Vec<ForecastDay>,
}

impl WeatherSnapshot {
    pub fn for_location(query: &LocationQuery) -> Self {
        Self { location: query.label(), ..Self::default() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub day: String,
    pub condition: String,
    pub icon_url: String,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
}

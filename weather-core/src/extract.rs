//! Reading individual values out of the rendered page.
//!
//! Every field is optional. A field whose element never shows up, or whose
//! text does not parse, is left empty and the rest of the page is still read.

use std::time::Duration;

use tracing::debug;

use crate::{
    model::WeatherSnapshot,
    session::{Locator, RenderingSession},
};

pub mod forecast;

pub use forecast::extract_forecast;

const PRESSURE_SELECTOR: &str =
    "div.anlik-dibasinc div.anlik-dibasinc-deger-kac[ng-bind*='denizeIndirgenmisBasinc']";

/// Current-conditions fields shown on the forecast page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Temperature,
    Condition,
    Humidity,
    Wind,
    Pressure,
}

impl Field {
    pub const ALL: [Field; 5] =
        [Field::Temperature, Field::Condition, Field::Humidity, Field::Wind, Field::Pressure];

    pub fn name(self) -> &'static str {
        match self {
            Field::Temperature => "temperature",
            Field::Condition => "condition",
            Field::Humidity => "humidity",
            Field::Wind => "wind",
            Field::Pressure => "pressure",
        }
    }

    pub fn locator(self) -> Locator {
        match self {
            Field::Temperature => {
                Locator::XPath("//*[contains(@ng-bind, 'sondurum[0].sicaklik | comma')]")
            }
            Field::Condition => Locator::XPath("//*[contains(@ng-bind, 'sondurum[0].hadiseAdi')]"),
            Field::Humidity => {
                Locator::Css("div.anlik-nem div.anlik-nem-deger-kac[ng-bind*='nem']")
            }
            Field::Wind => {
                Locator::Css("div.anlik-ruzgar div.anlik-ruzgar-deger-kac[ng-bind*='ruzgarHiz']")
            }
            Field::Pressure => Locator::Css(PRESSURE_SELECTOR),
        }
    }

    /// Store the raw element text into the matching snapshot slot.
    fn apply(self, snapshot: &mut WeatherSnapshot, raw: &str) {
        let slot = match self {
            Field::Condition => {
                snapshot.condition = raw.trim().to_string();
                return;
            }
            Field::Temperature => &mut snapshot.temp,
            Field::Humidity => &mut snapshot.humidity,
            Field::Wind => &mut snapshot.wind,
            Field::Pressure => &mut snapshot.pressure,
        };

        *slot = parse_decimal(raw);
        if slot.is_none() {
            debug!(field = self.name(), raw, "value is not a number");
        }
    }
}

/// Parse a number written with `,` as decimal separator.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Wait for `locator` and return its text, or `None` if anything goes wrong.
pub fn try_extract_text(
    session: &dyn RenderingSession,
    field: &str,
    locator: &Locator,
    timeout: Duration,
) -> Option<String> {
    let result = session.wait_for_visible(locator, timeout).and_then(|element| element.text());

    match result {
        Ok(text) => Some(text),
        Err(err) => {
            debug!(field, error = %err, "field left empty");
            None
        }
    }
}

/// Fill every current-conditions field the page provides.
pub fn extract_fields(
    session: &dyn RenderingSession,
    snapshot: &mut WeatherSnapshot,
    timeout: Duration,
) {
    for field in Field::ALL {
        if let Some(raw) = try_extract_text(session, field.name(), &field.locator(), timeout) {
            field.apply(snapshot, &raw);
        }
    }
}

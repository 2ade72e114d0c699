use crate::core::diagnostics::{Diagnostics, ERROR};
use crate::domain::model::{kelvin_to_fahrenheit, Locale, Temperature};
use crate::domain::ports::ForecastResolver;
use crate::utils::error::{HistogramError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_FORECAST_ENDPOINT: &str = "http://api.openweathermap.org/data/2.5/forecast/daily";
pub const DEFAULT_FORECAST_DAYS: u32 = 2;

/// Entry 0 is today.
const TOMORROW: usize = 1;

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    list: Option<Vec<DailyForecast>>,
}

#[derive(Debug, Deserialize)]
struct DailyForecast {
    temp: Option<DailyTemperatures>,
}

#[derive(Debug, Deserialize)]
struct DailyTemperatures {
    max: Option<f64>,
}

/// Tomorrow's high in Kelvin from an OpenWeatherMap daily forecast body.
///
/// An empty `list` yields 0 K rather than an error; a missing `list`, a list
/// with only today's entry, or an entry without `temp.max` is an error.
pub fn parse_tomorrows_high_kelvin(body: &str) -> std::result::Result<f64, String> {
    let payload: ForecastPayload =
        serde_json::from_str(body).map_err(|e| format!("malformed payload: {}", e))?;
    let days = payload
        .list
        .ok_or_else(|| "payload has no forecast list".to_string())?;

    if days.is_empty() {
        return Ok(0.0);
    }

    days.get(TOMORROW)
        .ok_or_else(|| format!("forecast list has {} entries, tomorrow is missing", days.len()))?
        .temp
        .as_ref()
        .and_then(|temp| temp.max)
        .ok_or_else(|| "tomorrow's entry has no temp.max".to_string())
}

/// Daily forecast client for the OpenWeatherMap `forecast/daily` API.
pub struct OpenWeatherClient {
    client: Client,
    endpoint: String,
    api_key: String,
    days: u32,
}

impl OpenWeatherClient {
    pub fn new(client: Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            days: DEFAULT_FORECAST_DAYS,
        }
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    async fn fetch(&self, locale: Locale) -> std::result::Result<f64, String> {
        tracing::debug!("Requesting forecast for {} from: {}", locale, self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("lat", locale.latitude.to_string()),
                ("lon", locale.longitude.to_string()),
                ("APPID", self.api_key.clone()),
                ("cnt", self.days.to_string()),
            ])
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("could not read response body: {}", e))?;

        if !status.is_success() {
            return Err(format!("service answered {}: {}", status, body));
        }

        parse_tomorrows_high_kelvin(&body).map_err(|reason| format!("{} in response {}", reason, body))
    }
}

#[async_trait]
impl ForecastResolver for OpenWeatherClient {
    async fn tomorrows_high(
        &self,
        locale: Locale,
        diagnostics: &mut Diagnostics,
    ) -> Result<Temperature> {
        match self.fetch(locale).await {
            Ok(kelvin) => Ok(kelvin_to_fahrenheit(kelvin)),
            Err(message) => {
                let err = HistogramError::Forecast {
                    latitude: locale.latitude,
                    longitude: locale.longitude,
                    message,
                };
                diagnostics.log(err.to_string(), ERROR);
                Err(err)
            }
        }
    }
}

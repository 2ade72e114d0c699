use crate::core::diagnostics::{Diagnostics, INFO};
use crate::domain::model::{IpAddress, Locale};
use crate::domain::ports::LocaleResolver;
use crate::utils::error::{HistogramError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_GEOIP_ENDPOINT: &str = "http://freegeoip.net/json";

#[derive(Debug, Deserialize)]
struct GeoIpPayload {
    latitude: f64,
    longitude: f64,
}

/// Parses a freegeoip-style JSON body. The (0, 0) sentinel parses fine.
pub fn parse_locale(body: &str) -> std::result::Result<Locale, serde_json::Error> {
    let payload: GeoIpPayload = serde_json::from_str(body)?;
    Ok(Locale::new(payload.latitude, payload.longitude))
}

/// `GET {endpoint}/{ip}` against a freegeoip-compatible service.
pub struct GeoIpClient {
    client: Client,
    endpoint: String,
}

impl GeoIpClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn url_for(&self, ip: &IpAddress) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), ip)
    }

    async fn fetch(&self, ip: &IpAddress) -> std::result::Result<Locale, String> {
        let url = self.url_for(ip);
        tracing::debug!("Requesting locale from: {}", url);

        let response = self
            .client
            .get(&url)
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

        parse_locale(&body).map_err(|e| format!("malformed payload ({}): {}", e, body))
    }
}

#[async_trait]
impl LocaleResolver for GeoIpClient {
    async fn resolve_locale(
        &self,
        ip: &IpAddress,
        diagnostics: &mut Diagnostics,
    ) -> Result<Locale> {
        let locale = self
            .fetch(ip)
            .await
            .map_err(|message| HistogramError::Resolution {
                ip: ip.to_string(),
                message,
            })?;

        diagnostics.log(format!("Found coordinates {} for {}", locale, ip), INFO);
        Ok(locale)
    }
}

use crate::adapters::geoip::DEFAULT_GEOIP_ENDPOINT;
use crate::adapters::weather::{DEFAULT_FORECAST_DAYS, DEFAULT_FORECAST_ENDPOINT};
use crate::core::extractor::DEFAULT_FALLBACK_FIELD;
use crate::utils::error::{HistogramError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Service endpoints and tuning, loaded from an optional TOML file.
/// Every section and key may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub geoip: GeoIpConfig,
    pub forecast: ForecastConfig,
    pub extract: ExtractConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeoIpConfig {
    pub endpoint: String,
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEOIP_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub endpoint: String,
    pub api_key: String,
    pub days: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_FORECAST_ENDPOINT.to_string(),
            api_key: String::new(),
            days: DEFAULT_FORECAST_DAYS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Whitespace-separated field reported for lines without an address.
    /// `None` disables the report.
    pub fallback_field: Option<usize>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            fallback_field: Some(DEFAULT_FALLBACK_FIELD),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
        pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => HistogramError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => HistogramError::Io(e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HistogramError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` from the environment; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.http.timeout_seconds.map(Duration::from_secs)
    }

    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("geoip.endpoint", &self.geoip.endpoint)?;
        validation::validate_url("forecast.endpoint", &self.forecast.endpoint)?;
        validation::validate_range("forecast.days", self.forecast.days, 2, 16)?;

        if let Some(timeout) = self.http.timeout_seconds {
            validation::validate_range("http.timeout_seconds", timeout, 1, 3600)?;
        }

        if self.forecast.api_key.trim().is_empty() {
            tracing::warn!("forecast.api_key is empty; the forecast service will likely reject requests");
        }

        Ok(())
    }
}

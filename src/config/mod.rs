pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::core::histogram::MAX_BUCKETS;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "ip2temp")]
#[command(about = "Histogram of tomorrow's forecast highs for the IP addresses found in a log file")]
pub struct CliConfig {
    /// Input file for parsing out IP addresses
    pub infile: String,

    /// Output TSV file
    pub outfile: String,

    /// The number of buckets to apply to the histogram
    pub buckets: usize,

    /// Optional TOML file with service endpoints and API key
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub geoip_endpoint: Option<String>,

    #[arg(long)]
    pub forecast_endpoint: Option<String>,

    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML settings (or defaults) and applies command-line overrides.
    pub fn settings(&self) -> Result<TomlConfig> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(endpoint) = &self.geoip_endpoint {
            settings.geoip.endpoint = endpoint.clone();
        }
        if let Some(endpoint) = &self.forecast_endpoint {
            settings.forecast.endpoint = endpoint.clone();
        }
        if let Some(key) = &self.api_key {
            settings.forecast.api_key = key.clone();
        }

        Ok(settings)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("infile", &self.infile)?;
        validation::validate_path("outfile", &self.outfile)?;
        validation::validate_range("buckets", self.buckets, 1, MAX_BUCKETS)?;
        Ok(())
    }
}

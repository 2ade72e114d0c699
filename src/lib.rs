pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{GeoIpClient, LocalStorage, OpenWeatherClient};
pub use crate::config::TomlConfig;
pub use crate::core::{
    diagnostics::Diagnostics,
    etl::{HistogramEngine, RunReport},
    extractor::IpExtractor,
    pipeline::{HistogramPipeline, Job},
};
pub use crate::utils::error::{HistogramError, Result};

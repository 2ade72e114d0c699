use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("File {path} does not exist")]
    FileNotFound { path: String },

    #[error("Could not resolve locale for {ip}: {message}")]
    Resolution { ip: String, message: String },

    #[error("Geolocation returned the (0, 0) sentinel for {ip}; skipping")]
    UnresolvedLocale { ip: String },

    #[error("Could not get forecast for coordinates {latitude} and {longitude}: {message}")]
    Forecast {
        latitude: f64,
        longitude: f64,
        message: String,
    },

    #[error("Invalid bucket count {0}: must be a positive integer")]
    InvalidBucketCount(usize),

    #[error("Cannot build a histogram from an empty temperature list")]
    EmptyInput,

    #[error("Temperature {0} is not finite")]
    NonFiniteTemperature(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HistogramError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileNotFound { .. } => ErrorCategory::Input,
            Self::Resolution { .. } | Self::Forecast { .. } | Self::Http(_) => {
                ErrorCategory::Network
            }
            Self::UnresolvedLocale { .. }
            | Self::EmptyInput
            | Self::NonFiniteTemperature(_)
            | Self::Csv(_)
            | Self::Serialization(_) => ErrorCategory::Data,
            Self::InvalidBucketCount(_)
            | Self::Pattern(_)
            | Self::Config { .. }
            | Self::InvalidConfigValue { .. } => ErrorCategory::Configuration,
            Self::Io(_) => ErrorCategory::System,
        }
    }

    /// Per-IP failures are recoverable (`Low`); anything that reaches the top
    /// level terminates the run.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Resolution { .. } | Self::UnresolvedLocale { .. } => ErrorSeverity::Low,
            Self::Forecast { .. } | Self::Http(_) => ErrorSeverity::Medium,
            Self::FileNotFound { .. }
            | Self::InvalidBucketCount(_)
            | Self::EmptyInput
            | Self::NonFiniteTemperature(_)
            | Self::Csv(_)
            | Self::Serialization(_)
            | Self::Pattern(_)
            | Self::Config { .. }
            | Self::InvalidConfigValue { .. } => ErrorSeverity::High,
            Self::Io(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::FileNotFound { path } => format!("Input file '{}' was not found", path),
            Self::Forecast { .. } | Self::Http(_) => {
                format!("The weather service could not be reached: {}", self)
            }
            Self::EmptyInput => {
                "No temperatures were collected, so there is nothing to histogram".to_string()
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check that the input path exists and is readable",
            ErrorCategory::Network => {
                "Check network access, the service endpoints and the forecast API key"
            }
            ErrorCategory::Data => {
                "Make sure the input contains routable IP addresses that can be geolocated"
            }
            ErrorCategory::Configuration => {
                "Review the command-line arguments and the configuration file"
            }
            ErrorCategory::System => "Check file permissions and free disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, HistogramError>;

pub mod diagnostics;
pub mod etl;
pub mod extractor;
pub mod histogram;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{Histogram, HistogramBucket, IpAddress, IpSet, Locale, Temperature};
pub use crate::domain::ports::{ForecastResolver, LocaleResolver, Pipeline, Storage};
pub use crate::utils::error::Result;

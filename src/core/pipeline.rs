use crate::core::diagnostics::{Diagnostics, ERROR};
use crate::core::extractor::IpExtractor;
use crate::core::histogram::build_histogram;
use crate::core::report::render_tsv;
use crate::core::{ForecastResolver, Histogram, IpSet, LocaleResolver, Pipeline, Storage};
use crate::utils::error::{HistogramError, Result};

/// What one run reads, writes and how finely it bins.
#[derive(Debug, Clone)]
pub struct Job {
    pub input_path: String,
    pub output_path: String,
    pub buckets: usize,
}

/// Log file → IP set → locales → tomorrow's highs → histogram → TSV.
///
/// Addresses are resolved one at a time. A failed or sentinel locale skips
/// that address; a failed forecast aborts the run.
pub struct HistogramPipeline<S: Storage, L: LocaleResolver, F: ForecastResolver> {
    storage: S,
    locator: L,
    forecaster: F,
    extractor: IpExtractor,
    job: Job,
}

impl<S: Storage, L: LocaleResolver, F: ForecastResolver> HistogramPipeline<S, L, F> {
    pub fn new(storage: S, locator: L, forecaster: F, extractor: IpExtractor, job: Job) -> Self {
        Self {
            storage,
            locator,
            forecaster,
            extractor,
            job,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, L: LocaleResolver, F: ForecastResolver> Pipeline for HistogramPipeline<S, L, F> {
    async fn extract(&self, diagnostics: &mut Diagnostics) -> Result<IpSet> {
        self.extractor
            .extract_from_file(&self.storage, &self.job.input_path, diagnostics)
            .await
    }

    async fn transform(&self, ips: IpSet, diagnostics: &mut Diagnostics) -> Result<Histogram> {
        let mut temperatures = Vec::with_capacity(ips.len());

        for ip in &ips {
            let locale = match self.locator.resolve_locale(ip, diagnostics).await {
                Ok(locale) => locale,
                Err(e) => {
                    diagnostics.log(e.to_string(), ERROR);
                    continue;
                }
            };

            if locale.is_unresolved() {
                let skipped = HistogramError::UnresolvedLocale { ip: ip.to_string() };
                diagnostics.log(skipped.to_string(), ERROR);
                continue;
            }

            let high = self.forecaster.tomorrows_high(locale, diagnostics).await?;
            tracing::debug!("{}: tomorrow's high {:.2}°F at {}", ip, high, locale);
            temperatures.push(high);
        }

        tracing::info!(
            "Collected {} temperatures from {} addresses",
            temperatures.len(),
            ips.len()
        );

        build_histogram(&temperatures, self.job.buckets)
    }

    async fn load(&self, histogram: &Histogram) -> Result<String> {
        let data = render_tsv(&histogram.buckets)?;

        tracing::debug!(
            "Writing {} buckets ({} bytes) to {}",
            histogram.buckets.len(),
            data.len(),
            self.job.output_path
        );
        self.storage.write_file(&self.job.output_path, &data).await?;

        Ok(self.job.output_path.clone())
    }
}

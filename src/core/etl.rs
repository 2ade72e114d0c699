use crate::core::diagnostics::Diagnostics;
use crate::core::report::write_summary;
use crate::core::{Histogram, Pipeline};
use crate::utils::error::Result;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: String,
    pub addresses: usize,
    pub histogram: Histogram,
}

pub struct HistogramEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> HistogramEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs the pipeline, then prints the issue summary to stdout.
    pub async fn run(&self, diagnostics: &mut Diagnostics) -> Result<RunReport> {
        let report = self.execute(diagnostics).await?;
        write_summary(diagnostics, &mut std::io::stdout().lock())?;
        Ok(report)
    }

    /// Like [`run`](Self::run), with the summary going to `summary_out`.
    pub async fn run_with_summary<W: Write>(
        &self,
        diagnostics: &mut Diagnostics,
        summary_out: &mut W,
    ) -> Result<RunReport> {
        let report = self.execute(diagnostics).await?;
        write_summary(diagnostics, summary_out)?;
        Ok(report)
    }

    async fn execute(&self, diagnostics: &mut Diagnostics) -> Result<RunReport> {
        tracing::info!("Extracting IP addresses...");
        let ips = self.pipeline.extract(diagnostics).await?;
        let addresses = ips.len();
        tracing::info!("Found {} unique routable IP addresses", addresses);

        tracing::info!("Resolving locales and forecasts...");
        let histogram = self.pipeline.transform(ips, diagnostics).await?;
        tracing::info!(
            "Built {} buckets from {} temperatures",
            histogram.buckets.len(),
            histogram.total_count()
        );

        tracing::info!("Writing report...");
        let output_path = self.pipeline.load(&histogram).await?;
        tracing::info!("Report saved to: {}", output_path);

        Ok(RunReport {
            output_path,
            addresses,
            histogram,
        })
    }
}

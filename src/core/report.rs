use crate::core::diagnostics::{Diagnostics, ERROR};
use crate::domain::model::HistogramBucket;
use crate::utils::error::{HistogramError, Result};
use std::io::Write;

pub const REPORT_HEADER: [&str; 3] = ["Minimum", "Maximum", "Count"];

/// Tab-separated report: header row, then one row per bucket with bounds to
/// two decimals.
pub fn render_tsv(buckets: &[HistogramBucket]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(REPORT_HEADER)?;
    for bucket in buckets {
        writer.write_record([
            format!("{:.2}", bucket.minimum),
            format!("{:.2}", bucket.maximum),
            bucket.count.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| HistogramError::Io(e.into_error()))
}

/// Writes the end-of-run list of `ERROR` entries. Nothing is written when
/// the run was clean.
pub fn write_summary<W: Write>(diagnostics: &Diagnostics, out: &mut W) -> Result<()> {
    let issues = diagnostics.get_logs(ERROR);
    if issues.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "The following issues were found:")?;
    writeln!(out)?;
    for issue in issues {
        writeln!(out, "{}", issue)?;
    }
    Ok(())
}

use crate::core::diagnostics::{Diagnostics, ERROR};
use crate::domain::model::{IpAddress, IpSet};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use regex::Regex;

const IPV4_PATTERN: &str = r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b";

/// Field reported for lines that carry no address, in the access-log layout
/// this tool was first pointed at.
pub const DEFAULT_FALLBACK_FIELD: usize = 22;

/// Pulls routable IPv4 tokens out of free-form text.
///
/// Only the first token on each line is considered; further addresses on the
/// same line are ignored.
pub struct IpExtractor {
    pattern: Regex,
    fallback_field: Option<usize>,
}

impl IpExtractor {
    pub fn new(fallback_field: Option<usize>) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(IPV4_PATTERN)?,
            fallback_field,
        })
    }

    pub async fn extract_from_file<S: Storage>(
        &self,
        storage: &S,
        path: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<IpSet> {
        let raw = storage.read_file(path).await?;
        let text = String::from_utf8_lossy(&raw);
        tracing::debug!("Scanning {} ({} bytes) for IP addresses", path, raw.len());
        Ok(self.extract(&text, diagnostics))
    }

    pub fn extract(&self, text: &str, diagnostics: &mut Diagnostics) -> IpSet {
        let mut ips = IpSet::new();

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;

            let Some(found) = self.pattern.find(line) else {
                self.report_missing_address(line, line_number, diagnostics);
                continue;
            };

            let ip = IpAddress::from_matched(found.as_str());
            if ip.is_non_routable() {
                diagnostics.log(format!("Found a non-routable IP {}; skipping", ip), ERROR);
                continue;
            }

            ips.insert(ip);
        }

        tracing::debug!("Extracted {} unique routable IP addresses", ips.len());
        ips
    }

    fn report_missing_address(&self, line: &str, line_number: usize, diagnostics: &mut Diagnostics) {
        match self
            .fallback_field
            .and_then(|field| line.split_whitespace().nth(field))
        {
            Some(value) => diagnostics.log(
                format!(
                    "Line {}: found {} in log instead of IP address",
                    line_number, value
                ),
                ERROR,
            ),
            None => tracing::trace!("Line {}: no IP address", line_number),
        }
    }
}

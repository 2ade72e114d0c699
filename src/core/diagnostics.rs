//! Facility-keyed run diagnostics.
//!
//! Components append here instead of failing when a single input is
//! unusable. Every entry is echoed through `tracing` as it is recorded, and
//! the `ERROR` facility is summarised once the report has been written.

use crate::utils::logger::DIAGNOSTICS_TARGET;
use std::collections::BTreeMap;

pub const ERROR: &str = "ERROR";
pub const INFO: &str = "INFO";

#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: BTreeMap<String, Vec<String>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, message: impl Into<String>, facility: &str) {
        let message = message.into();
        if facility == ERROR {
            tracing::warn!(target: DIAGNOSTICS_TARGET, "{}", message);
        } else {
            tracing::info!(target: DIAGNOSTICS_TARGET, "{}", message);
        }
        self.entries
            .entry(facility.to_string())
            .or_default()
            .push(message);
    }

    /// Messages recorded under `facility`, oldest first.
    pub fn get_logs(&self, facility: &str) -> &[String] {
        self.entries
            .get(facility)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn all_logs(&self) -> &BTreeMap<String, Vec<String>> {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

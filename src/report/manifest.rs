//! Run Manifest - record of one report invocation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::Report;

/// Summary of one report run, written as `manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunManifest {
    name: String,
    generated_at: DateTime<Utc>,
    configurations: usize,
    parsed: usize,
    missing: usize,
    malformed: usize,
    tables: Vec<String>,
    config: Option<serde_json::Value>,
}

impl RunManifest {
    /// Describe a finished report, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if the configuration cannot be serialized.
    pub fn from_report(report: &Report) -> crate::Result<Self> {
        let collected = report.collected();
        Ok(Self::builder(report.config().name.as_str())
            .configurations(report.analysis().summaries().populated())
            .counts(collected.parsed, collected.missing, collected.malformed.len())
            .tables(report.tables().iter().map(|t| t.name.clone()).collect())
            .config(serde_json::to_value(report.config())?)
            .build())
    }

    /// Create a builder for a manifest with the given report name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> RunManifestBuilder {
        RunManifestBuilder::new(name)
    }

    /// Get the report name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the generation timestamp.
    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Get the number of configurations with data.
    #[must_use]
    pub const fn configurations(&self) -> usize {
        self.configurations
    }

    /// Get the parsed, missing and malformed file counts.
    #[must_use]
    pub const fn counts(&self) -> (usize, usize, usize) {
        (self.parsed, self.missing, self.malformed)
    }

    /// Get the names of the emitted tables.
    #[must_use]
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Get the configuration snapshot, if recorded.
    #[must_use]
    pub const fn config(&self) -> Option<&serde_json::Value> {
        self.config.as_ref()
    }
}

/// Builder for `RunManifest`.
#[derive(Debug)]
pub struct RunManifestBuilder {
    name: String,
    generated_at: DateTime<Utc>,
    configurations: usize,
    parsed: usize,
    missing: usize,
    malformed: usize,
    tables: Vec<String>,
    config: Option<serde_json::Value>,
}

impl RunManifestBuilder {
    /// Create a new builder stamped with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generated_at: Utc::now(),
            configurations: 0,
            parsed: 0,
            missing: 0,
            malformed: 0,
            tables: Vec::new(),
            config: None,
        }
    }

    /// Set the generation timestamp.
    #[must_use]
    pub const fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    /// Set the number of configurations with data.
    #[must_use]
    pub const fn configurations(mut self, n: usize) -> Self {
        self.configurations = n;
        self
    }

    /// Set the collection counters.
    #[must_use]
    pub const fn counts(mut self, parsed: usize, missing: usize, malformed: usize) -> Self {
        self.parsed = parsed;
        self.missing = missing;
        self.malformed = malformed;
        self
    }

    /// Set the emitted table names.
    #[must_use]
    pub fn tables(mut self, tables: Vec<String>) -> Self {
        self.tables = tables;
        self
    }

    /// Set the configuration snapshot.
    #[must_use]
    pub fn config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the manifest.
    #[must_use]
    pub fn build(self) -> RunManifest {
        RunManifest {
            name: self.name,
            generated_at: self.generated_at,
            configurations: self.configurations,
            parsed: self.parsed,
            missing: self.missing,
            malformed: self.malformed,
            tables: self.tables,
            config: self.config,
        }
    }
}

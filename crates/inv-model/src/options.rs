//! Configuration options for record normalization.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Year assigned to dates written as "<day> de <month>", which carry none.
pub const DEFAULT_LOCALE_YEAR: i32 = 2026;

/// Years that can be written as a four-digit `YYYY-MM-DD` date.
pub const LOCALE_YEAR_RANGE: RangeInclusive<i32> = 1..=9999;

/// How much of the normalizer runs on manually created or edited records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManualEditPolicy {
    /// Only the category rule runs; other fields are stored as given.
    #[default]
    CategoryOnly,
    /// The full row normalizer runs, exactly as for batch ingestion.
    Full,
}

impl fmt::Display for ManualEditPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManualEditPolicy::CategoryOnly => f.write_str("category-only"),
            ManualEditPolicy::Full => f.write_str("full"),
        }
    }
}

impl FromStr for ManualEditPolicy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category-only" | "category_only" | "category" => Ok(ManualEditPolicy::CategoryOnly),
            "full" => Ok(ManualEditPolicy::Full),
            other => Err(ModelError::UnknownEditPolicy(other.to_string())),
        }
    }
}

/// Options for normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationOptions {
    /// Year used for "<day> de <month>" dates.
    pub locale_year: i32,

    /// Normalization applied to manual create/update operations.
    pub manual_edits: ManualEditPolicy,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            locale_year: DEFAULT_LOCALE_YEAR,
            manual_edits: ManualEditPolicy::default(),
        }
    }
}

impl NormalizationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale_year(mut self, year: i32) -> Self {
        self.locale_year = year;
        self
    }

    pub fn with_manual_edits(mut self, policy: ManualEditPolicy) -> Self {
        self.manual_edits = policy;
        self
    }
}

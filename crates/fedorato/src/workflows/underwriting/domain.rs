use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for broker submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Region code such as a US state abbreviation, stored trimmed and upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Jurisdiction(String);

impl Jurisdiction {
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Jurisdiction {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for Jurisdiction {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Jurisdiction> for String {
    fn from(value: Jurisdiction) -> Self {
        value.0
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A broker's request under review, fully typed after intake validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub title: String,
    pub broker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_of_business: Option<String>,
    pub effective_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub customer: CustomerInfo,
    pub metrics: UnderwritingMetrics,
    /// Free-text category; may carry several tokens ("wood frame", "masonry non combustible").
    pub construction_type: String,
    pub oldest_building: i32,
    /// Upstream likelihood of securing the business, 0 through 100.
    pub winnability: u8,
    /// Fields the broker left out. Informational only.
    #[serde(default)]
    pub missing_data: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub address: String,
    pub jurisdiction: Jurisdiction,
}

/// Exposure and pricing figures. Only `tiv` and `total_premium` feed the rules; the
/// remaining fields are carried for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderwritingMetrics {
    pub tiv: f64,
    pub total_premium: f64,
    #[serde(default)]
    pub revenue: String,
    #[serde(default)]
    pub employee_count: String,
    #[serde(default)]
    pub claims_history: String,
}

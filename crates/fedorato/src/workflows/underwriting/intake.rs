use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{CustomerInfo, Jurisdiction, Submission, SubmissionId, UnderwritingMetrics};

/// Rejections raised at the ingestion boundary, before a draft reaches the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("`{field}` must not be negative (found {value})")]
    NegativeAmount { field: &'static str, value: f64 },
    #[error("`{field}` must be a finite amount")]
    NonFiniteAmount { field: &'static str },
    #[error("winnability score {0} is outside 0-100")]
    ScoreOutOfRange(i64),
    #[error("oldest building year {0} is not a four-digit year")]
    InvalidBuildingYear(i64),
    #[error("`{field}` value '{value}' is not a YYYY-MM-DD or MM/DD/YYYY date")]
    InvalidDate { field: &'static str, value: String },
    #[error("jurisdiction '{0}' is not a two-letter region code")]
    InvalidJurisdiction(String),
}

/// Loosely-typed submission as brokers and upstream exports deliver it.
///
/// Aliases accept the camelCase shape of the dashboard's sample records
/// (`customerInfo`, `underwritingMetrics`, `scoreValue`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionDraft {
    #[serde(deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub broker: Option<String>,
    #[serde(alias = "lineOfBusiness")]
    pub line_of_business: Option<String>,
    #[serde(alias = "effectiveDate")]
    pub effective_date: Option<String>,
    #[serde(alias = "expirationDate")]
    pub expiration_date: Option<String>,
    #[serde(alias = "customerInfo")]
    pub customer: CustomerDraft,
    #[serde(alias = "underwritingMetrics")]
    pub metrics: MetricsDraft,
    #[serde(alias = "constructionType")]
    pub construction_type: Option<String>,
    #[serde(alias = "oldestBuilding")]
    pub oldest_building: Option<i64>,
    #[serde(alias = "scoreValue")]
    pub winnability: Option<i64>,
    #[serde(alias = "missingData")]
    pub missing_data: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerDraft {
    pub name: Option<String>,
    pub address: Option<String>,
    #[serde(alias = "state")]
    pub jurisdiction: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsDraft {
    pub tiv: Option<f64>,
    #[serde(alias = "totalPremium")]
    pub total_premium: Option<f64>,
    pub revenue: Option<String>,
    #[serde(alias = "employeeCount")]
    pub employee_count: Option<String>,
    #[serde(alias = "claimsHistory")]
    pub claims_history: Option<String>,
}

impl SubmissionDraft {
    /// The caller's identifier, trimmed. `None` when absent or blank.
    pub fn supplied_id(&self) -> Option<SubmissionId> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| SubmissionId(raw.to_string()))
    }
}

/// Placeholder id on submissions validated outside the service. The service decides
/// identity from [`SubmissionDraft::supplied_id`], never from this value.
pub const PENDING_SUBMISSION_ID: &str = "pending";

/// Converts drafts into typed submissions, rejecting malformed records.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn submission_from_draft(
        &self,
        draft: SubmissionDraft,
    ) -> Result<Submission, ValidationError> {
        let id = draft
            .supplied_id()
            .unwrap_or_else(|| SubmissionId(PENDING_SUBMISSION_ID.to_string()));

        let title = required_text(draft.title, "title")?;
        let broker = strip_broker_label(&required_text(draft.broker, "broker")?);
        let customer_name = required_text(draft.customer.name, "customer.name")?;
        let jurisdiction = parse_jurisdiction(draft.customer.jurisdiction)?;

        let tiv = required_amount(draft.metrics.tiv, "metrics.tiv")?;
        let total_premium = required_amount(draft.metrics.total_premium, "metrics.total_premium")?;

        let construction_type =
            required_text(draft.construction_type, "construction_type")?.to_ascii_lowercase();

        let oldest_building = draft
            .oldest_building
            .ok_or(ValidationError::MissingField("oldest_building"))?;
        if !(1000..=9999).contains(&oldest_building) {
            return Err(ValidationError::InvalidBuildingYear(oldest_building));
        }

        let winnability = draft
            .winnability
            .ok_or(ValidationError::MissingField("winnability"))?;
        if !(0..=100).contains(&winnability) {
            return Err(ValidationError::ScoreOutOfRange(winnability));
        }

        let effective_date = required_date(draft.effective_date, "effective_date")?;
        let expiration_date = required_date(draft.expiration_date, "expiration_date")?;

        Ok(Submission {
            id,
            title,
            broker,
            line_of_business: optional_text(draft.line_of_business),
            effective_date,
            expiration_date,
            customer: CustomerInfo {
                name: customer_name,
                address: optional_text(draft.customer.address).unwrap_or_default(),
                jurisdiction,
            },
            metrics: UnderwritingMetrics {
                tiv,
                total_premium,
                revenue: optional_text(draft.metrics.revenue).unwrap_or_default(),
                employee_count: optional_text(draft.metrics.employee_count).unwrap_or_default(),
                claims_history: optional_text(draft.metrics.claims_history).unwrap_or_default(),
            },
            construction_type,
            oldest_building: oldest_building as i32,
            winnability: winnability as u8,
            missing_data: draft
                .missing_data
                .into_iter()
                .map(|field| field.trim().to_string())
                .filter(|field| !field.is_empty())
                .collect(),
        })
    }
}

/// Parse dates in either ISO (`2025-09-01`) or US dashboard (`09/01/2025`) form.
pub fn parse_submission_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
        .ok()
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    optional_text(value).ok_or(ValidationError::MissingField(field))
}

fn required_amount(value: Option<f64>, field: &'static str) -> Result<f64, ValidationError> {
    let amount = value.ok_or(ValidationError::MissingField(field))?;
    if !amount.is_finite() {
        return Err(ValidationError::NonFiniteAmount { field });
    }
    if amount < 0.0 {
        return Err(ValidationError::NegativeAmount {
            field,
            value: amount,
        });
    }
    Ok(amount)
}

fn required_date(value: Option<String>, field: &'static str) -> Result<NaiveDate, ValidationError> {
    let raw = required_text(value, field)?;
    parse_submission_date(&raw).ok_or(ValidationError::InvalidDate { field, value: raw })
}

fn parse_jurisdiction(value: Option<String>) -> Result<Jurisdiction, ValidationError> {
    let raw = required_text(value, "customer.jurisdiction")?;
    if raw.len() == 2 && raw.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(Jurisdiction::new(&raw))
    } else {
        Err(ValidationError::InvalidJurisdiction(raw))
    }
}

// Sample exports carry "Broker: Marsh".
fn strip_broker_label(broker: &str) -> String {
    match broker.split_once(':') {
        Some((label, name)) if label.trim().eq_ignore_ascii_case("broker") => {
            name.trim().to_string()
        }
        _ => broker.to_string(),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.map(|value| match value {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}

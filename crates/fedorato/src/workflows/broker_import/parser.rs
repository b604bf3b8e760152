use super::mapping::canonical_construction;
use super::normalizer::parse_amount;
use super::BrokerImportError;
use crate::workflows::underwriting::{CustomerDraft, MetricsDraft, SubmissionDraft};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_drafts<R: Read>(reader: R) -> Result<Vec<SubmissionDraft>, BrokerImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut drafts = Vec::new();

    for (index, record) in csv_reader.deserialize::<BrokerRow>().enumerate() {
        let row = record?;
        drafts.push(row.into_draft(index + 1)?);
    }

    Ok(drafts)
}

#[derive(Debug, Deserialize)]
struct BrokerRow {
    #[serde(rename = "Id", alias = "ID", default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(rename = "Title", default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    #[serde(rename = "Broker", default, deserialize_with = "empty_string_as_none")]
    broker: Option<String>,
    #[serde(
        rename = "Line of Business",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    line_of_business: Option<String>,
    #[serde(
        rename = "Customer",
        alias = "Customer Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    customer: Option<String>,
    #[serde(rename = "Address", default, deserialize_with = "empty_string_as_none")]
    address: Option<String>,
    #[serde(rename = "State", default, deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    #[serde(rename = "TIV", default, deserialize_with = "empty_string_as_none")]
    tiv: Option<String>,
    #[serde(
        rename = "Total Premium",
        alias = "Premium",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    total_premium: Option<String>,
    #[serde(rename = "Revenue", default, deserialize_with = "empty_string_as_none")]
    revenue: Option<String>,
    #[serde(
        rename = "Employee Count",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    employee_count: Option<String>,
    #[serde(
        rename = "Claims History",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    claims_history: Option<String>,
    #[serde(
        rename = "Construction",
        alias = "Construction Type",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    construction: Option<String>,
    #[serde(
        rename = "Oldest Building",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    oldest_building: Option<String>,
    #[serde(rename = "Winnability", default, deserialize_with = "empty_string_as_none")]
    winnability: Option<String>,
    #[serde(
        rename = "Effective Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    effective_date: Option<String>,
    #[serde(
        rename = "Expiration Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    expiration_date: Option<String>,
    #[serde(
        rename = "Missing Data",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    missing_data: Option<String>,
}

impl BrokerRow {
    fn into_draft(self, row: usize) -> Result<SubmissionDraft, BrokerImportError> {
        let tiv = amount_cell(self.tiv, row, "TIV")?;
        let total_premium = amount_cell(self.total_premium, row, "Total Premium")?;
        let oldest_building = integer_cell(self.oldest_building, row, "Oldest Building")?;
        let winnability = integer_cell(self.winnability, row, "Winnability")?;

        Ok(SubmissionDraft {
            id: self.id,
            title: self.title,
            broker: self.broker,
            line_of_business: self.line_of_business,
            effective_date: self.effective_date,
            expiration_date: self.expiration_date,
            customer: CustomerDraft {
                name: self.customer,
                address: self.address,
                jurisdiction: self.state,
            },
            metrics: MetricsDraft {
                tiv,
                total_premium,
                revenue: self.revenue,
                employee_count: self.employee_count,
                claims_history: self.claims_history,
            },
            construction_type: self.construction.as_deref().map(canonical_construction),
            oldest_building,
            winnability,
            missing_data: self
                .missing_data
                .map(|cell| {
                    cell.split(';')
                        .map(str::trim)
                        .filter(|field| !field.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

fn amount_cell(
    value: Option<String>,
    row: usize,
    column: &'static str,
) -> Result<Option<f64>, BrokerImportError> {
    match value {
        None => Ok(None),
        Some(raw) => match parse_amount(&raw) {
            Some(amount) => Ok(Some(amount)),
            None => Err(BrokerImportError::InvalidNumber {
                row,
                column,
                value: raw,
            }),
        },
    }
}

fn integer_cell(
    value: Option<String>,
    row: usize,
    column: &'static str,
) -> Result<Option<i64>, BrokerImportError> {
    match value {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(number) => Ok(Some(number)),
            Err(_) => Err(BrokerImportError::InvalidNumber {
                row,
                column,
                value: raw,
            }),
        },
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

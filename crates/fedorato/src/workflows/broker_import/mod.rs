//! Reads broker submission exports into drafts for the intake guard.

mod mapping;
mod normalizer;
mod parser;

use crate::workflows::underwriting::SubmissionDraft;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum BrokerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
}

impl std::fmt::Display for BrokerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrokerImportError::Io(err) => write!(f, "failed to read broker export: {}", err),
            BrokerImportError::Csv(err) => write!(f, "invalid broker CSV data: {}", err),
            BrokerImportError::Json(err) => write!(f, "invalid broker JSON data: {}", err),
            BrokerImportError::InvalidNumber { row, column, value } => write!(
                f,
                "row {}: column '{}' value '{}' is not a number",
                row, column, value
            ),
        }
    }
}

impl std::error::Error for BrokerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BrokerImportError::Io(err) => Some(err),
            BrokerImportError::Csv(err) => Some(err),
            BrokerImportError::Json(err) => Some(err),
            BrokerImportError::InvalidNumber { .. } => None,
        }
    }
}

impl From<std::io::Error> for BrokerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BrokerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for BrokerImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

pub struct BrokerSubmissionImporter;

impl BrokerSubmissionImporter {
    /// Load a broker export, choosing JSON for `.json` files and CSV otherwise.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SubmissionDraft>, BrokerImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_reader(file)
        } else {
            Self::from_reader(file)
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<SubmissionDraft>, BrokerImportError> {
        parser::parse_drafts(reader)
    }

    /// A JSON array of draft objects, in the field layout `SubmissionDraft` accepts.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<SubmissionDraft>, BrokerImportError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

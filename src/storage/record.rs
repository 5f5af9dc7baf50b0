use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ValidationError, Vacancy};

/// A vacancy in its stored form.
///
/// Field names and order are the on-disk format. Salary bounds are kept as raw
/// JSON so that a stored value of the wrong type is caught by vacancy
/// validation rather than failing the whole file; an unset bound is written as
/// `null`, never as `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyRecord {
    /// The title of the posting.
    pub name: String,
    /// The location label.
    pub area: String,
    /// The link to the posting.
    pub url: String,
    /// The lower salary bound, or `null`.
    #[serde(default)]
    pub salary_from: Option<Value>,
    /// The upper salary bound, or `null`.
    #[serde(default)]
    pub salary_to: Option<Value>,
    /// The free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

impl From<&Vacancy> for VacancyRecord {
    fn from(vacancy: &Vacancy) -> Self {
        Self {
            name: vacancy.name().to_string(),
            area: vacancy.area().to_string(),
            url: vacancy.url().to_string(),
            salary_from: vacancy.salary_from().map(Value::from),
            salary_to: vacancy.salary_to().map(Value::from),
            description: Some(vacancy.description().to_string()),
        }
    }
}

impl TryFrom<VacancyRecord> for Vacancy {
    type Error = ValidationError;

    fn try_from(record: VacancyRecord) -> Result<Self, Self::Error> {
        Self::from_untyped(
            record.name,
            record.area,
            record.url,
            record.salary_from.as_ref(),
            record.salary_to.as_ref(),
            record.description,
        )
    }
}

/// Errors that can occur when rebuilding a vacancy from a stored record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The record is missing a field or a field has the wrong type.
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The record's fields do not make a valid vacancy.
    #[error("invalid record: {0}")]
    Invalid(#[from] ValidationError),
}

impl VacancyRecord {
    /// Rebuild a vacancy from an arbitrary stored JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a record or if the record fails
    /// vacancy validation.
    pub fn reconstruct(value: Value) -> Result<Vacancy, RecordError> {
        let record: Self = serde_json::from_value(value)?;
        Ok(Vacancy::try_from(record)?)
    }
}

/// The link of a stored JSON value, if it has one.
pub(crate) fn record_url(value: &Value) -> Option<&str> {
    value.get("url")?.as_str()
}

//! Job platforms are the source of new vacancies.
//!
//! A platform supplies raw [`Candidate`] records, which are validated into
//! [`Vacancy`] values here before anything is saved. Platforms also resolve
//! free-text place names into the numeric [`AreaId`] their searches take.

use serde_json::Value;

use crate::{AddOutcome, StoreError, ValidationError, Vacancy, VacancyStore};

/// The `HeadHunter` (hh.ru) API client.
pub mod head_hunter;
pub use head_hunter::HeadHunter;

/// A platform's numeric identifier for a region or city.
pub type AreaId = u32;

/// The area searched when no other area is known (Russia).
pub const DEFAULT_AREA_ID: AreaId = 113;

/// A platform that can be searched for vacancies.
pub trait VacancySource {
    /// Search for vacancies matching `query` within `area`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform cannot be reached or its response
    /// cannot be understood.
    fn vacancies(&self, query: &str, area: AreaId) -> Result<Vec<Candidate>, PlatformError>;
}

/// A platform that can map place names to area identifiers.
pub trait AreaResolver {
    /// The identifier of the area called `name`, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform cannot be reached or its response
    /// cannot be understood.
    fn area_id(&self, name: &str) -> Result<Option<AreaId>, PlatformError>;
}

/// A vacancy as supplied by a platform, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    /// Display name of the posting.
    pub name: String,
    /// Display name of the posting's area.
    pub area: String,
    /// Canonical link to the posting.
    pub url: String,
    /// Lower salary bound, as supplied.
    pub salary_from: Option<Value>,
    /// Upper salary bound, as supplied.
    pub salary_to: Option<Value>,
    /// Short requirement text, used as the description.
    pub requirement: Option<String>,
}

impl TryFrom<Candidate> for Vacancy {
    type Error = ValidationError;

    fn try_from(candidate: Candidate) -> Result<Self, Self::Error> {
        Self::from_untyped(
            candidate.name,
            candidate.area,
            candidate.url,
            candidate.salary_from.as_ref(),
            candidate.salary_to.as_ref(),
            candidate.requirement,
        )
    }
}

/// Errors that can occur when talking to a job platform.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    /// The request could not be sent or no response arrived.
    #[error("request to {url} failed")]
    Transport {
        /// The requested URL.
        url: String,
        /// The underlying HTTP error.
        source: reqwest::Error,
    },
    /// The platform answered with a non-success status.
    #[error("{url} responded with status {status}")]
    Status {
        /// The requested URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
    /// The response body could not be decoded.
    #[error("failed to decode response from {url}")]
    Decode {
        /// The requested URL.
        url: String,
        /// The underlying decoding error.
        source: reqwest::Error,
    },
}

/// How the search area was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaChoice {
    /// The place name was resolved to this area.
    Resolved(AreaId),
    /// The place name could not be resolved and this default is used instead.
    Default(AreaId),
}

impl AreaChoice {
    /// The chosen area.
    #[must_use]
    pub const fn id(self) -> AreaId {
        match self {
            Self::Resolved(id) | Self::Default(id) => id,
        }
    }
}

/// Resolve a place name, falling back to `default` rather than failing.
///
/// Both an unknown name and a platform error select the default; the error is
/// logged.
pub fn resolve_area<R>(resolver: &R, name: &str, default: AreaId) -> AreaChoice
where
    R: AreaResolver + ?Sized,
{
    match resolver.area_id(name) {
        Ok(Some(id)) => AreaChoice::Resolved(id),
        Ok(None) => {
            tracing::debug!("No area named '{name}', using default {default}");
            AreaChoice::Default(default)
        }
        Err(e) => {
            tracing::warn!("Failed to resolve area '{name}': {e}");
            AreaChoice::Default(default)
        }
    }
}

/// A candidate that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    /// The candidate as supplied.
    pub candidate: Candidate,
    /// Why it was rejected.
    pub error: ValidationError,
}

/// The outcome of [`import_candidates`].
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Valid vacancies in the order they were supplied, with what the store
    /// did with each.
    pub accepted: Vec<(Vacancy, AddOutcome)>,
    /// Candidates that failed validation.
    pub rejected: Vec<Rejected>,
}

impl ImportReport {
    /// The number of vacancies newly saved.
    #[must_use]
    pub fn added(&self) -> usize {
        self.count(AddOutcome::Added)
    }

    /// The number of vacancies that were already saved.
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.count(AddOutcome::Duplicate)
    }

    fn count(&self, outcome: AddOutcome) -> usize {
        self.accepted.iter().filter(|(_, o)| *o == outcome).count()
    }
}

/// Validate candidates and save the valid ones.
///
/// A candidate that fails validation is recorded in the report and the rest
/// of the batch is still processed.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written. Vacancies saved
/// before the failure stay saved.
pub fn import_candidates<S, I>(store: &mut S, candidates: I) -> Result<ImportReport, StoreError>
where
    S: VacancyStore + ?Sized,
    I: IntoIterator<Item = Candidate>,
{
    let mut report = ImportReport::default();

    for candidate in candidates {
        match Vacancy::try_from(candidate.clone()) {
            Ok(vacancy) => {
                let outcome = store.add(&vacancy)?;
                report.accepted.push((vacancy, outcome));
            }
            Err(error) => {
                tracing::info!("Rejected candidate '{}': {error}", candidate.url);
                report.rejected.push(Rejected { candidate, error });
            }
        }
    }

    Ok(report)
}

//! Job Vacancy Shortlists
//!
//! Vacancies found through a job-search API are validated into [`Vacancy`]
//! values and kept in a local, human-readable JSON file. Saved vacancies can be
//! ranked by salary or filtered by keyword later on.

pub mod domain;
pub use domain::{Config, SalaryBound, ValidationError, Vacancy};

/// Persistent stores of saved vacancies.
pub mod storage;
pub use storage::{AddOutcome, JsonVacancyStore, MemoryVacancyStore, StoreError, VacancyStore};

/// Read-only views over saved vacancies.
pub mod ranking;
pub use ranking::{filter_by_keyword, top_n};

/// Job platforms that supply candidate vacancies.
pub mod platform;
pub use platform::{AreaId, AreaResolver, Candidate, HeadHunter, PlatformError, VacancySource};

//! Persistence of saved vacancies.
//!
//! Every store implements [`VacancyStore`]. A store is a sequence of vacancies
//! in insertion order in which no two vacancies share a link.

use std::{io, path::PathBuf};

use crate::Vacancy;

/// A JSON file backed store.
pub mod json;
mod memory;
mod record;

pub use json::JsonVacancyStore;
pub use memory::MemoryVacancyStore;
pub use record::{RecordError, VacancyRecord};

/// A store of saved vacancies, keyed on the vacancy link.
pub trait VacancyStore {
    /// Append a vacancy unless one with the same link is already saved.
    ///
    /// A duplicate is not an error; the store is left untouched and
    /// [`AddOutcome::Duplicate`] is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    fn add(&mut self, vacancy: &Vacancy) -> Result<AddOutcome, StoreError>;

    /// Saved vacancies whose description contains `criterion`, ignoring case.
    ///
    /// An empty criterion matches every vacancy. Results are in insertion
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn query(&self, criterion: &str) -> Result<Vec<Vacancy>, StoreError>;

    /// Remove every saved vacancy with the given link.
    ///
    /// Returns the number of vacancies removed, which is zero if the link is
    /// unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    fn remove(&mut self, url: &str) -> Result<usize, StoreError>;
}

/// The result of [`VacancyStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The vacancy was appended to the store.
    Added,
    /// A vacancy with the same link was already saved.
    Duplicate,
}

/// Errors that can occur when reading or writing a store.
///
/// A missing or unparseable store file is not an error; it reads as an empty
/// store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The directory holding the store could not be created.
    #[error("failed to create store directory {}", path.display())]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The store could not be read.
    #[error("failed to read vacancy store {}", path.display())]
    Read {
        /// The store location.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The store could not be written.
    #[error("failed to write vacancy store {}", path.display())]
    Write {
        /// The store location.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

//! A JSON file backed store of vacancies
//!
//! The [`JsonVacancyStore`] keeps every saved vacancy in a single pretty-printed
//! JSON array. Each operation reads the whole file, changes it, and writes the
//! whole file back; nothing is cached between calls.

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use serde_json::Value;

use super::{
    AddOutcome, StoreError, VacancyStore,
    record::{VacancyRecord, record_url},
};
use crate::{Vacancy, ranking::matches_keyword};

/// A store of vacancies kept in one JSON file.
#[derive(Debug, Clone)]
pub struct JsonVacancyStore {
    path: PathBuf,
}

impl JsonVacancyStore {
    /// Opens a store at the given path.
    ///
    /// The parent directory is created if it does not exist. The file itself
    /// is only created by the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        Ok(Self { path })
    }

    /// The location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored record.
    ///
    /// A missing file and a file that is not a JSON array both read as an
    /// empty store.
    fn load(&self) -> Result<Vec<Value>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No vacancy store at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => return Err(self.read_error(source)),
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(records) => Ok(records),
            Err(e) if e.is_io() => Err(self.read_error(e.into())),
            Err(e) => {
                tracing::warn!(
                    "Vacancy store {} is unreadable, treating it as empty: {e}",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the file with the given records.
    fn save(&self, records: &[Value]) -> Result<(), StoreError> {
        let file = File::create(&self.path).map_err(|e| self.write_error(e))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, records)
            .map_err(|e| self.write_error(e.into()))?;
        writer.flush().map_err(|e| self.write_error(e))
    }

    fn read_error(&self, source: io::Error) -> StoreError {
        StoreError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl VacancyStore for JsonVacancyStore {
    fn add(&mut self, vacancy: &Vacancy) -> Result<AddOutcome, StoreError> {
        let mut records = self.load()?;

        if records
            .iter()
            .any(|record| record_url(record) == Some(vacancy.url()))
        {
            tracing::debug!("Skipping duplicate vacancy {}", vacancy.url());
            return Ok(AddOutcome::Duplicate);
        }

        let record = serde_json::to_value(vacancy.to_record())
            .map_err(|e| self.write_error(e.into()))?;
        records.push(record);
        self.save(&records)?;

        tracing::info!("Saved vacancy {}", vacancy.url());
        Ok(AddOutcome::Added)
    }

    fn query(&self, criterion: &str) -> Result<Vec<Vacancy>, StoreError> {
        let records = self.load()?;

        let vacancies = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match VacancyRecord::reconstruct(value) {
                Ok(vacancy) => Some(vacancy),
                Err(e) => {
                    tracing::warn!(
                        "Skipping stored record #{index} in {}: {e}",
                        self.path.display()
                    );
                    None
                }
            })
            .filter(|vacancy| matches_keyword(vacancy, criterion))
            .collect();

        Ok(vacancies)
    }

    fn remove(&mut self, url: &str) -> Result<usize, StoreError> {
        let mut records = self.load()?;
        let before = records.len();

        records.retain(|record| record_url(record) != Some(url));
        self.save(&records)?;

        let removed = before - records.len();
        tracing::info!("Removed {removed} vacancies with link {url}");
        Ok(removed)
    }
}

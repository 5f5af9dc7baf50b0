use super::{AddOutcome, StoreError, VacancyStore};
use crate::{Vacancy, ranking::matches_keyword};

/// A store that keeps vacancies in memory.
///
/// It has the same semantics as the file backed stores but nothing outlives
/// the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryVacancyStore {
    vacancies: Vec<Vacancy>,
}

impl MemoryVacancyStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vacancies: Vec::new(),
        }
    }

    /// The number of saved vacancies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vacancies.len()
    }

    /// Whether the store holds no vacancies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vacancies.is_empty()
    }
}

impl VacancyStore for MemoryVacancyStore {
    fn add(&mut self, vacancy: &Vacancy) -> Result<AddOutcome, StoreError> {
        if self.vacancies.contains(vacancy) {
            return Ok(AddOutcome::Duplicate);
        }
        self.vacancies.push(vacancy.clone());
        Ok(AddOutcome::Added)
    }

    fn query(&self, criterion: &str) -> Result<Vec<Vacancy>, StoreError> {
        Ok(self
            .vacancies
            .iter()
            .filter(|vacancy| matches_keyword(vacancy, criterion))
            .cloned()
            .collect())
    }

    fn remove(&mut self, url: &str) -> Result<usize, StoreError> {
        let before = self.vacancies.len();
        self.vacancies.retain(|vacancy| vacancy.url() != url);
        Ok(before - self.vacancies.len())
    }
}

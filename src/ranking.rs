use std::num::NonZeroUsize;

use crate::{StoreError, Vacancy, VacancyStore};

/// The `n` best paid vacancies, highest effective salary first.
///
/// The sort is stable, so vacancies with equal salaries keep their relative
/// order. Fewer than `n` vacancies are returned if the input is shorter.
#[must_use]
pub fn top_n(mut vacancies: Vec<Vacancy>, n: NonZeroUsize) -> Vec<Vacancy> {
    vacancies.sort_by(|a, b| b.cmp_salary(a));
    vacancies.truncate(n.get());
    vacancies
}

/// Saved vacancies whose description contains `keyword`, ignoring case.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn filter_by_keyword<S>(store: &S, keyword: &str) -> Result<Vec<Vacancy>, StoreError>
where
    S: VacancyStore + ?Sized,
{
    store.query(keyword)
}

/// Whether the vacancy's description contains `keyword`, ignoring case.
///
/// Only the description is searched. An empty keyword matches everything.
#[must_use]
pub fn matches_keyword(vacancy: &Vacancy, keyword: &str) -> bool {
    keyword.is_empty()
        || vacancy
            .description()
            .to_lowercase()
            .contains(&keyword.to_lowercase())
}

use std::{
    borrow::Cow,
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use non_empty_string::NonEmptyString;
use serde_json::Value;

use crate::storage::VacancyRecord;

/// Number of description characters shown when a vacancy is rendered.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// A single job posting.
///
/// Vacancies are immutable once constructed. Two vacancies are equal when
/// their links are equal, whatever their other fields hold; the link is the
/// identity key used by the stores.
#[derive(Debug, Clone)]
pub struct Vacancy {
    name: NonEmptyString,
    area: String,
    url: NonEmptyString,
    salary_from: Option<i64>,
    salary_to: Option<i64>,
    description: String,
}

/// One of the two bounds of a salary range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryBound {
    /// The lower bound.
    From,
    /// The upper bound.
    To,
}

impl fmt::Display for SalaryBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => f.write_str("from"),
            Self::To => f.write_str("to"),
        }
    }
}

/// Reasons a vacancy cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The vacancy name is empty.
    #[error("vacancy name is required")]
    MissingName,
    /// The vacancy link is empty.
    #[error("vacancy link is required")]
    MissingUrl,
    /// A salary bound is present but is not a whole number.
    #[error("salary '{bound}' must be a whole number, got {value}")]
    NonIntegralSalary {
        /// The offending bound.
        bound: SalaryBound,
        /// The rejected value, as JSON text.
        value: String,
    },
    /// A salary bound is a whole number too large to store.
    #[error("salary '{bound}' is out of range, got {value}")]
    SalaryOutOfRange {
        /// The offending bound.
        bound: SalaryBound,
        /// The rejected value, as JSON text.
        value: String,
    },
}

impl Vacancy {
    /// Construct a new [`Vacancy`].
    ///
    /// An absent description is stored as an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` or `url` is empty.
    pub fn new(
        name: impl Into<String>,
        area: impl Into<String>,
        url: impl Into<String>,
        salary_from: Option<i64>,
        salary_to: Option<i64>,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = NonEmptyString::new(name.into()).map_err(|_| ValidationError::MissingName)?;
        let url = NonEmptyString::new(url.into()).map_err(|_| ValidationError::MissingUrl)?;

        Ok(Self {
            name,
            area: area.into(),
            url,
            salary_from,
            salary_to,
            description: description.unwrap_or_default(),
        })
    }

    /// Construct a [`Vacancy`] whose salary bounds are untyped JSON values.
    ///
    /// This is the entry point for data that did not originate in this crate,
    /// such as stored records or API responses. A `null` or absent bound is
    /// treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` or `url` is empty, or if a salary bound is
    /// present but is not a whole number.
    pub fn from_untyped(
        name: impl Into<String>,
        area: impl Into<String>,
        url: impl Into<String>,
        salary_from: Option<&Value>,
        salary_to: Option<&Value>,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let url = url.into();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if url.is_empty() {
            return Err(ValidationError::MissingUrl);
        }

        let salary_from = whole_salary(salary_from, SalaryBound::From)?;
        let salary_to = whole_salary(salary_to, SalaryBound::To)?;

        Self::new(name, area, url, salary_from, salary_to, description)
    }

    /// The title of the posting.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The location label. May be empty.
    #[must_use]
    pub fn area(&self) -> &str {
        &self.area
    }

    /// The link to the posting. This is the vacancy's identity.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// The lower salary bound, if specified.
    #[must_use]
    pub const fn salary_from(&self) -> Option<i64> {
        self.salary_from
    }

    /// The upper salary bound, if specified.
    #[must_use]
    pub const fn salary_to(&self) -> Option<i64> {
        self.salary_to
    }

    /// The free-text description. Empty when none was given.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The salary used for ranking.
    ///
    /// This is the upper bound if present, otherwise the lower bound,
    /// otherwise zero.
    #[must_use]
    pub fn effective_salary(&self) -> i64 {
        self.salary_to.or(self.salary_from).unwrap_or(0)
    }

    /// Compare two vacancies by [effective salary](Self::effective_salary).
    ///
    /// Vacancies with the same effective salary compare as equal here even if
    /// they are different postings.
    #[must_use]
    pub fn cmp_salary(&self, other: &Self) -> Ordering {
        self.effective_salary().cmp(&other.effective_salary())
    }

    /// The description, cut to [`DESCRIPTION_PREVIEW_CHARS`] characters.
    ///
    /// An ellipsis is appended when anything was cut.
    #[must_use]
    pub fn description_preview(&self) -> Cow<'_, str> {
        match self.description.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
            Some((cut, _)) => Cow::Owned(format!("{}...", &self.description[..cut])),
            None => Cow::Borrowed(&self.description),
        }
    }

    /// The flat, serializable form of this vacancy.
    #[must_use]
    pub fn to_record(&self) -> VacancyRecord {
        VacancyRecord::from(self)
    }
}

/// Interpret an untyped salary bound.
///
/// `None` and JSON `null` both mean "not specified". Anything other than an
/// integer is rejected, including numeric strings and floats such as `1.0`.
/// Whole numbers beyond `i64` are rejected separately.
fn whole_salary(value: Option<&Value>, bound: SalaryBound) -> Result<Option<i64>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) if number.is_i64() => Ok(number.as_i64()),
        Some(Value::Number(number)) if number.is_u64() => Err(ValidationError::SalaryOutOfRange {
            bound,
            value: number.to_string(),
        }),
        Some(other) => Err(ValidationError::NonIntegralSalary {
            bound,
            value: other.to_string(),
        }),
    }
}

impl PartialEq for Vacancy {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Vacancy {}

impl Hash for Vacancy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.as_str().hash(state);
    }
}

impl fmt::Display for Vacancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vacancy: {}", self.name())?;
        writeln!(f, "Region: {}", self.area)?;

        if self.salary_from.is_none() && self.salary_to.is_none() {
            writeln!(f, "Salary not specified")?;
        } else {
            f.write_str("Salary:")?;
            if let Some(from) = self.salary_from {
                write!(f, " from {from}")?;
            }
            if let Some(to) = self.salary_to {
                write!(f, " to {to}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Description: {}", self.description_preview())?;
        writeln!(f, "Link: {}", self.url())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;
    use test_case::test_case;

    use super::*;

    fn python_developer() -> Vacancy {
        Vacancy::new(
            "Python Developer",
            "Москва",
            "https://hh.ru/vacancy/123",
            Some(100_000),
            Some(150_000),
            Some("Разработка на Python".to_string()),
        )
        .unwrap()
    }

    fn with_salary(url: &str, from: Option<i64>, to: Option<i64>) -> Vacancy {
        Vacancy::new("Developer", "Москва", url, from, to, None).unwrap()
    }

    #[test]
    fn construction_keeps_every_field() {
        let vacancy = python_developer();

        assert_eq!(vacancy.name(), "Python Developer");
        assert_eq!(vacancy.area(), "Москва");
        assert_eq!(vacancy.url(), "https://hh.ru/vacancy/123");
        assert_eq!(vacancy.salary_from(), Some(100_000));
        assert_eq!(vacancy.salary_to(), Some(150_000));
        assert_eq!(vacancy.description(), "Разработка на Python");
    }

    #[test]
    fn construction_without_salary_leaves_bounds_unset() {
        let vacancy = Vacancy::new("Tester", "", "https://hh.ru/vacancy/1", None, None, None).unwrap();

        assert_eq!(vacancy.salary_from(), None);
        assert_eq!(vacancy.salary_to(), None);
        assert_eq!(vacancy.description(), "");
    }

    #[test_case("", "https://hh.ru", ValidationError::MissingName; "empty name")]
    #[test_case("Python", "", ValidationError::MissingUrl; "empty url")]
    fn construction_requires_name_and_url(name: &str, url: &str, expected: ValidationError) {
        let error = Vacancy::new(name, "Москва", url, Some(1), Some(2), None).unwrap_err();
        assert_eq!(error, expected);
    }

    #[test_case(json!("100000"), SalaryBound::From; "string lower bound")]
    #[test_case(json!(100_000.5), SalaryBound::From; "fractional lower bound")]
    #[test_case(json!(1.0), SalaryBound::To; "float upper bound")]
    #[test_case(json!(true), SalaryBound::To; "boolean upper bound")]
    fn untyped_construction_rejects_non_integral_salary(value: Value, bound: SalaryBound) {
        let (from, to) = match bound {
            SalaryBound::From => (Some(&value), None),
            SalaryBound::To => (None, Some(&value)),
        };

        let error =
            Vacancy::from_untyped("Python", "Москва", "https://hh.ru", from, to, None).unwrap_err();

        assert_eq!(
            error,
            ValidationError::NonIntegralSalary {
                bound,
                value: value.to_string()
            }
        );
    }

    #[test]
    fn untyped_construction_rejects_salary_beyond_i64() {
        let huge: Value = serde_json::from_str("10000000000000000000").unwrap();

        let error = Vacancy::from_untyped("Python", "Москва", "https://hh.ru", None, Some(&huge), None)
            .unwrap_err();

        assert_eq!(
            error,
            ValidationError::SalaryOutOfRange {
                bound: SalaryBound::To,
                value: "10000000000000000000".to_string()
            }
        );
        assert_eq!(
            error.to_string(),
            "salary 'to' is out of range, got 10000000000000000000"
        );
    }

    #[test]
    fn untyped_construction_treats_null_as_unset() {
        let vacancy = Vacancy::from_untyped(
            "Python",
            "Москва",
            "https://hh.ru",
            Some(&Value::Null),
            Some(&json!(90_000)),
            None,
        )
        .unwrap();

        assert_eq!(vacancy.salary_from(), None);
        assert_eq!(vacancy.salary_to(), Some(90_000));
    }

    #[test]
    fn untyped_construction_checks_required_fields_first() {
        let error = Vacancy::from_untyped("", "", "", Some(&json!("x")), None, None).unwrap_err();
        assert_eq!(error, ValidationError::MissingName);
    }

    #[test]
    fn equality_is_decided_by_url_alone() {
        let a = Vacancy::new("A", "Москва", "https://hh.ru/1", Some(1), None, None).unwrap();
        let b = Vacancy::new("B", "Казань", "https://hh.ru/1", None, Some(9), None).unwrap();
        let c = Vacancy::new("A", "Москва", "https://hh.ru/2", Some(1), None, None).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);

        let unique: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn url_comparison_is_case_sensitive() {
        let lower = with_salary("https://hh.ru/vacancy/abc", None, None);
        let upper = with_salary("https://hh.ru/vacancy/ABC", None, None);
        assert_ne!(lower, upper);
    }

    #[test_case(Some(50_000), Some(80_000), 80_000; "both bounds use upper")]
    #[test_case(Some(50_000), None, 50_000; "lower bound only")]
    #[test_case(None, Some(70_000), 70_000; "upper bound only")]
    #[test_case(None, None, 0; "no bounds")]
    fn effective_salary_prefers_upper_bound(from: Option<i64>, to: Option<i64>, expected: i64) {
        assert_eq!(with_salary("https://hh.ru/1", from, to).effective_salary(), expected);
    }

    #[test]
    fn vacancies_order_by_effective_salary() {
        let junior = with_salary("https://hh.ru/124", Some(50_000), Some(80_000));
        let middle = python_developer();
        let senior = with_salary("https://hh.ru/125", Some(200_000), Some(250_000));
        let unspecified = with_salary("https://hh.ru/126", None, None);

        assert_eq!(junior.cmp_salary(&middle), Ordering::Less);
        assert_eq!(middle.cmp_salary(&senior), Ordering::Less);
        assert_eq!(senior.cmp_salary(&junior), Ordering::Greater);
        assert_eq!(unspecified.cmp_salary(&junior), Ordering::Less);
    }

    #[test]
    fn equal_salaries_tie_regardless_of_other_fields() {
        let a = with_salary("https://hh.ru/1", Some(10), Some(100));
        let b = with_salary("https://hh.ru/2", None, Some(100));

        assert_eq!(a.cmp_salary(&b), Ordering::Equal);
        assert_ne!(a, b);
    }

    #[test]
    fn renders_full_layout() {
        let expected = "Vacancy: Python Developer\n\
                        Region: Москва\n\
                        Salary: from 100000 to 150000\n\
                        Description: Разработка на Python\n\
                        Link: https://hh.ru/vacancy/123\n";

        assert_eq!(python_developer().to_string(), expected);
    }

    #[test]
    fn renders_truncated_description_with_ellipsis() {
        let description = "Требуется ".repeat(11);
        let vacancy = Vacancy::new(
            "Rust Developer",
            "Казань",
            "https://hh.ru/vacancy/7",
            Some(200_000),
            Some(300_000),
            Some(description),
        )
        .unwrap();

        let expected = "Vacancy: Rust Developer\n\
                        Region: Казань\n\
                        Salary: from 200000 to 300000\n\
                        Description: Требуется Требуется Требуется Требуется Требуется Требуется Требуется Требуется Требуется Требуется ...\n\
                        Link: https://hh.ru/vacancy/7\n";

        assert_eq!(vacancy.to_string(), expected);
    }

    #[test_case(Some(100), None, "Salary: from 100\n"; "lower bound only")]
    #[test_case(None, Some(200), "Salary: to 200\n"; "upper bound only")]
    #[test_case(None, None, "Salary not specified\n"; "no bounds")]
    fn renders_salary_line(from: Option<i64>, to: Option<i64>, line: &str) {
        let rendered = with_salary("https://hh.ru/1", from, to).to_string();
        assert!(rendered.contains(line), "{rendered:?} should contain {line:?}");
    }

    #[test]
    fn description_of_exactly_preview_length_is_not_truncated() {
        let description = "я".repeat(DESCRIPTION_PREVIEW_CHARS);
        let vacancy =
            Vacancy::new("A", "", "https://hh.ru/1", None, None, Some(description.clone())).unwrap();

        assert_eq!(vacancy.description_preview(), description);
    }
}

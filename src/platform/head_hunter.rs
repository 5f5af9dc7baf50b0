use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use tracing::instrument;

use super::{AreaId, AreaResolver, Candidate, PlatformError, VacancySource};
use crate::Config;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);

/// A client for the `HeadHunter` public API.
#[derive(Debug, Clone)]
pub struct HeadHunter {
    client: Client,
    base_url: String,
    per_page: u32,
    only_with_salary: bool,
}

impl HeadHunter {
    /// The public API endpoint.
    pub const DEFAULT_URL: &'static str = "https://api.hh.ru";

    /// Creates a client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()
            .map_err(PlatformError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            per_page: 100,
            only_with_salary: true,
        })
    }

    /// Creates a client using the API settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self, PlatformError> {
        Ok(Self::new(config.api_url.as_str())?
            .with_per_page(config.per_page)
            .with_only_with_salary(config.only_with_salary))
    }

    /// Sets the number of vacancies requested per search.
    #[must_use]
    pub const fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Sets whether searches only return vacancies that state a salary.
    #[must_use]
    pub const fn with_only_with_salary(mut self, only_with_salary: bool) -> Self {
        self.only_with_salary = only_with_salary;
        self
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, PlatformError> {
        let url = format!("{}/{path}", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|source| PlatformError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlatformError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json()
            .map_err(|source| PlatformError::Decode { url, source })
    }
}

impl VacancySource for HeadHunter {
    #[instrument(level = "debug", skip(self))]
    fn vacancies(&self, query: &str, area: AreaId) -> Result<Vec<Candidate>, PlatformError> {
        let params = [
            ("text", query.to_string()),
            ("area", area.to_string()),
            ("per_page", self.per_page.to_string()),
            ("only_with_salary", self.only_with_salary.to_string()),
        ];

        let page: VacanciesPage = self.get("vacancies", &params)?;
        tracing::debug!("Received {} vacancies", page.items.len());

        Ok(page.candidates())
    }
}

impl AreaResolver for HeadHunter {
    #[instrument(level = "debug", skip(self))]
    fn area_id(&self, name: &str) -> Result<Option<AreaId>, PlatformError> {
        let areas: Vec<Area> = self.get("areas", &[])?;
        Ok(find_area(&areas, name))
    }
}

/// A page of search results.
///
/// Items are kept undecoded so that one malformed item is dropped on its own
/// instead of failing the whole page.
#[derive(Debug, Deserialize)]
struct VacanciesPage {
    #[serde(default)]
    items: Vec<Value>,
}

impl VacanciesPage {
    fn candidates(self) -> Vec<Candidate> {
        self.items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<Item>(item) {
                Ok(item) => Some(Candidate::from(item)),
                Err(e) => {
                    tracing::warn!("Skipping malformed search result #{index}: {e}");
                    None
                }
            })
            .collect()
    }
}

/// A single search result.
///
/// Every field may be missing or `null`. An item without a name or link
/// still becomes a [`Candidate`] and is rejected by validation.
#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    area: Option<Named>,
    #[serde(default)]
    alternate_url: Option<String>,
    #[serde(default)]
    salary: Option<Salary>,
    #[serde(default)]
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct Named {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Salary {
    #[serde(default)]
    from: Option<Value>,
    #[serde(default)]
    to: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    requirement: Option<String>,
}

impl From<Item> for Candidate {
    fn from(item: Item) -> Self {
        let (salary_from, salary_to) = item
            .salary
            .map_or((None, None), |salary| (salary.from, salary.to));

        Self {
            name: item.name.unwrap_or_default(),
            area: item.area.and_then(|area| area.name).unwrap_or_default(),
            url: item.alternate_url.unwrap_or_default(),
            salary_from,
            salary_to,
            requirement: item.snippet.and_then(|snippet| snippet.requirement),
        }
    }
}

/// A node of the area tree: a country, region or city.
#[derive(Debug, Deserialize)]
struct Area {
    #[serde(default, deserialize_with = "deserialize_area_id")]
    id: Option<AreaId>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    areas: Vec<Area>,
}

/// The API sends area ids as strings; integers are accepted too.
fn deserialize_area_id<'de, D>(deserializer: D) -> Result<Option<AreaId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdOrText {
        Id(AreaId),
        Text(String),
    }

    match Option::<IdOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdOrText::Id(id)) => Ok(Some(id)),
        Some(IdOrText::Text(text)) => text
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid area id: {text}"))),
    }
}

/// Depth-first search of the area tree for a case-insensitive name match.
fn find_area(areas: &[Area], name: &str) -> Option<AreaId> {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    find_area_lowercase(areas, &wanted)
}

fn find_area_lowercase(areas: &[Area], wanted: &str) -> Option<AreaId> {
    areas.iter().find_map(|area| {
        area.id
            .filter(|_| area.name.to_lowercase() == wanted)
            .or_else(|| find_area_lowercase(&area.areas, wanted))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{ValidationError, Vacancy};

    fn area_tree() -> Vec<Area> {
        serde_json::from_value(json!([
            {
                "areas": [
                    {"name": "Москва", "id": 1, "areas": []},
                    {
                        "name": "Россия",
                        "id": 113,
                        "areas": [
                            {"name": "Санкт-Петербург", "id": 2},
                            {"name": "Новосибирск", "id": 4}
                        ]
                    }
                ]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn find_area_searches_regions_and_cities() {
        let areas = area_tree();

        assert_eq!(find_area(&areas, "Москва"), Some(1));
        assert_eq!(find_area(&areas, "Санкт-Петербург"), Some(2));
        assert_eq!(find_area(&areas, "новосибирск"), Some(4));
    }

    #[test]
    fn find_area_returns_none_for_unknown_names() {
        let areas = area_tree();

        assert_eq!(find_area(&areas, "Несуществующий город"), None);
        assert_eq!(find_area(&areas, "  "), None);
    }

    #[test]
    fn area_ids_may_be_strings() {
        let areas: Vec<Area> = serde_json::from_value(json!([
            {"id": "113", "name": "Россия", "areas": [{"id": "88", "name": "Казань", "areas": []}]}
        ]))
        .unwrap();

        assert_eq!(find_area(&areas, "Казань"), Some(88));
        assert_eq!(find_area(&areas, "россия"), Some(113));
    }

    #[test]
    fn malformed_area_id_is_an_error() {
        let result: Result<Vec<Area>, _> =
            serde_json::from_value(json!([{"id": "abc", "name": "X"}]));
        assert!(result.is_err());
    }

    #[test]
    fn page_items_become_candidates() {
        let page: VacanciesPage = serde_json::from_value(json!({
            "items": [
                {
                    "name": "Python Developer",
                    "area": {"name": "Москва"},
                    "alternate_url": "https://hh.ru/vacancy/123",
                    "salary": {"from": 100_000, "to": 150_000, "currency": "RUR"},
                    "snippet": {"requirement": "Опыт работы с Python"}
                },
                {
                    "name": "Intern",
                    "alternate_url": "https://hh.ru/vacancy/124",
                    "salary": null,
                    "snippet": {"requirement": null}
                }
            ],
            "found": 2
        }))
        .unwrap();

        let candidates = page.candidates();

        assert_eq!(
            candidates[0],
            Candidate {
                name: "Python Developer".to_string(),
                area: "Москва".to_string(),
                url: "https://hh.ru/vacancy/123".to_string(),
                salary_from: Some(json!(100_000)),
                salary_to: Some(json!(150_000)),
                requirement: Some("Опыт работы с Python".to_string()),
            }
        );
        assert_eq!(
            candidates[1],
            Candidate {
                name: "Intern".to_string(),
                url: "https://hh.ru/vacancy/124".to_string(),
                ..Candidate::default()
            }
        );
    }

    #[test]
    fn null_fields_reject_only_their_own_item() {
        let page: VacanciesPage = serde_json::from_value(json!({
            "items": [
                {
                    "name": "Python Developer",
                    "area": {"name": "Москва"},
                    "alternate_url": "https://hh.ru/vacancy/123",
                    "salary": {"from": 100_000, "to": null}
                },
                {
                    "name": null,
                    "area": {"name": null},
                    "alternate_url": "https://hh.ru/vacancy/124"
                },
                {
                    "name": "QA",
                    "alternate_url": null
                },
                {
                    "name": 42,
                    "alternate_url": "https://hh.ru/vacancy/126"
                }
            ]
        }))
        .unwrap();

        let candidates = page.candidates();

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].name, "Python Developer");
        assert_eq!(candidates[1].name, "");
        assert_eq!(candidates[1].area, "");
        assert_eq!(candidates[2].url, "");

        let vacancies: Vec<_> = candidates.into_iter().map(Vacancy::try_from).collect();
        assert!(vacancies[0].is_ok());
        assert_eq!(vacancies[1], Err(ValidationError::MissingName));
        assert_eq!(vacancies[2], Err(ValidationError::MissingUrl));
    }

    #[test]
    fn page_without_items_is_empty() {
        let page: VacanciesPage = serde_json::from_value(json!({})).unwrap();
        assert!(page.candidates().is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let client = HeadHunter::new("http://localhost:9/").unwrap();
        assert_eq!(client.base_url, "http://localhost:9");
    }
}

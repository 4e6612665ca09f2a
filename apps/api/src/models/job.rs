use serde::{Deserialize, Serialize};

/// User-editable search criteria. The only mutable entity in the system —
/// everything downstream is a read-only derivation of one search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub keyword: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub company: String,
    pub min_salary: f64,
    pub max_salary: f64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            keyword: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            company: String::new(),
            min_salary: 0.0,
            max_salary: 300_000.0,
        }
    }
}

impl FilterCriteria {
    /// True when no text filter is set. An empty criteria set never reaches
    /// the provider — the pipeline short-circuits to a skipped search.
    pub fn is_empty(&self) -> bool {
        [
            &self.keyword,
            &self.city,
            &self.state,
            &self.country,
            &self.company,
        ]
        .iter()
        .all(|f| f.trim().is_empty())
    }

    /// Joins the non-empty location parts into a single display string,
    /// e.g. "Berlin, Germany".
    pub fn location_text(&self) -> String {
        [&self.city, &self.state, &self.country]
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One job posting as returned by the provider. Ephemeral — each search
/// replaces the prior result set wholesale. The `id` is an opaque provider
/// string, unique only within a single result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
}

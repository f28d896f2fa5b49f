//! Job postings, search queries and resume match scores.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_KEYWORDS: &str = "developer";
pub const DEFAULT_LOCATION: &str = "new york";

/// A single job posting as returned by the job search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub location: String,
    /// HTML fragment.
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub contract_type: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub created: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub redirect_url: String,
}

impl Job {
    pub fn company_label(&self) -> &str {
        self.company
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or("Unknown company")
    }

    /// Posting date as `M/D/YYYY`. Falls back to the raw value when it can't be parsed.
    pub fn posted_on(&self) -> String {
        parse_posting_date(&self.created)
            .map(|d| d.format("%-m/%-d/%Y").to_string())
            .unwrap_or_else(|| self.created.clone())
    }
}

fn parse_posting_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keywords and location for a job search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchQuery {
    pub keywords: String,
    pub location: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.to_string(),
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl SearchQuery {
    /// Build a query from raw form input; blank fields take the defaults.
    pub fn from_form(keywords: &str, location: &str) -> Self {
        let pick = |value: &str, default: &str| {
            let value = value.trim();
            if value.is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        };
        Self {
            keywords: pick(keywords, DEFAULT_KEYWORDS),
            location: pick(location, DEFAULT_LOCATION),
        }
    }
}

/// Resume-to-job match as a whole percentage, always within 0..=100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchScore(u8);

impl MatchScore {
    pub fn from_raw(raw: f64) -> Self {
        if raw.is_nan() {
            return MatchScore(0);
        }
        MatchScore(raw.round().clamp(0.0, 100.0) as u8)
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}

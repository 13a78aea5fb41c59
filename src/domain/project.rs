use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Record;

pub const NO_DATA: &str = "No data";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        ProjectId(s)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        ProjectId(s.to_string())
    }
}

/// One portfolio case study, as stored in the `projects` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: ProjectId,
    #[serde(rename = "projectName", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(rename = "projectImage", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methodology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies_used: Option<String>,
    #[serde(
        default,
        with = "cms_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_date: Option<NaiveDate>,
    #[serde(rename = "projectUrl", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Record for Project {
    const COLLECTION: &'static str = "projects";
}

impl Project {
    pub fn display_name(&self) -> &str {
        non_blank(&self.name).unwrap_or(NO_DATA)
    }

    pub fn display_description(&self) -> &str {
        non_blank(&self.short_description).unwrap_or(NO_DATA)
    }

    pub fn technologies(&self) -> Option<&str> {
        non_blank(&self.technologies_used)
    }

    pub fn methodology(&self) -> Option<&str> {
        non_blank(&self.methodology)
    }

    pub fn results(&self) -> Option<&str> {
        non_blank(&self.results)
    }

    pub fn external_url(&self) -> Option<&str> {
        non_blank(&self.url)
    }

    pub fn image(&self) -> Option<&str> {
        non_blank(&self.image)
    }

    /// Format the project date as "March 2024", or an empty string when absent
    pub fn date_display(&self) -> String {
        self.project_date
            .map(|date| date.format("%B %Y").to_string())
            .unwrap_or_default()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// The store hands dates back as `YYYY-MM-DD`, as full RFC 3339 timestamps,
/// or wrapped as `{"$date": "..."}`. Anything else reads as absent.
mod cms_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(parse_value))
    }

    fn parse_value(value: &Value) -> Option<NaiveDate> {
        match value {
            Value::String(s) => super::parse_date(s),
            Value::Object(map) => map.get("$date").and_then(parse_value),
            _ => None,
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

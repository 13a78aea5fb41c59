use serde::{Deserialize, Serialize};

/// Who the portfolio belongs to and where visitors can reach them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteProfile {
    pub owner_name: String,
    pub role: String,
    pub summary: String,
    pub email: String,
    pub linkedin_url: String,
    pub github_url: String,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            owner_name: "Dhanuja".to_string(),
            role: "Data Analyst".to_string(),
            summary: "Data Analyst specializing in transforming complex datasets into actionable insights."
                .to_string(),
            email: "dhanuja@example.com".to_string(),
            linkedin_url: "https://linkedin.com".to_string(),
            github_url: "https://github.com".to_string(),
        }
    }
}

impl SiteProfile {
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

use std::fmt;

use super::{DomainError, DomainResult, ProjectId};

/// Addressable pages of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Projects,
    ProjectDetail(ProjectId),
    Contact,
}

impl Route {
    pub fn parse(path: &str) -> DomainResult<Self> {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .trim_start_matches('/')
            .trim_end_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["projects"] => Ok(Route::Projects),
            ["projects", id] => {
                let decoded = urlencoding::decode(id)
                    .map_err(|_| DomainError::InvalidId(id.to_string()))?;
                Ok(Route::ProjectDetail(ProjectId(decoded.into_owned())))
            }
            ["contact"] => Ok(Route::Contact),
            _ => Err(DomainError::InvalidRoute(trimmed.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::ProjectDetail(id) => format!("/projects/{}", urlencoding::encode(&id.0)),
            Route::Contact => "/contact".to_string(),
        }
    }

    /// Exact-path match used to highlight the active navigation entry
    pub fn is_active(&self, nav_target: &Route) -> bool {
        self.path() == nav_target.path()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/").unwrap(), Route::Home);
        assert_eq!(Route::parse("").unwrap(), Route::Home);
        assert_eq!(Route::parse("/projects").unwrap(), Route::Projects);
        assert_eq!(Route::parse("/projects/").unwrap(), Route::Projects);
        assert_eq!(Route::parse("/contact").unwrap(), Route::Contact);
        assert_eq!(
            Route::parse("/projects/abc-123").unwrap(),
            Route::ProjectDetail(ProjectId::from("abc-123"))
        );
    }

    #[test]
    fn test_detail_segment_is_percent_decoded() {
        let route = Route::parse("/projects/a%20b").unwrap();
        assert_eq!(route, Route::ProjectDetail(ProjectId::from("a b")));
        assert_eq!(route.path(), "/projects/a%20b");
    }

    #[test]
    fn test_unknown_paths_are_rejected() {
        assert!(matches!(
            Route::parse("/blog"),
            Err(DomainError::InvalidRoute(_))
        ));
        assert!(Route::parse("/projects/a/b").is_err());
    }

    #[test]
    fn test_active_match_is_exact() {
        let detail = Route::ProjectDetail("x".into());
        assert!(!detail.is_active(&Route::Projects));
        assert!(Route::Projects.is_active(&Route::Projects));
    }
}

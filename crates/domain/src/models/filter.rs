//! Filter and search state for the users table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    #[serde(rename = "")]
    Any,
    Active,
    Deactive,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Any => "",
            StatusFilter::Active => "active",
            StatusFilter::Deactive => "deactive",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(StatusFilter::Any),
            "active" => Ok(StatusFilter::Active),
            "deactive" => Ok(StatusFilter::Deactive),
            other => Err(format!(
                "unknown status filter '{}', expected 'active' or 'deactive'",
                other
            )),
        }
    }
}

/// How the free-text clause combines with the equality filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPrecedence {
    /// Every clause is conjoined with the equality filters.
    #[default]
    Strict,
    /// Only name, username and phone matches are gated by the equality
    /// filters; the other field matches bypass them.
    Legacy,
}

/// Current filter selections. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub deputy: String,
    #[serde(default)]
    pub directorate: String,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub search: String,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.deputy.is_empty()
            && self.directorate.is_empty()
            && self.status == StatusFilter::Any
            && self.search.is_empty()
    }

    pub fn with_deputy(mut self, deputy: impl Into<String>) -> Self {
        self.deputy = deputy.into();
        self
    }

    pub fn with_directorate(mut self, directorate: impl Into<String>) -> Self {
        self.directorate = directorate.into();
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("".parse::<StatusFilter>().unwrap(), StatusFilter::Any);
        assert_eq!(
            "active".parse::<StatusFilter>().unwrap(),
            StatusFilter::Active
        );
        assert_eq!(
            "deactive".parse::<StatusFilter>().unwrap(),
            StatusFilter::Deactive
        );
        assert!("inactive".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_status_filter_serde() {
        assert_eq!(serde_json::to_string(&StatusFilter::Any).unwrap(), "\"\"");
        assert_eq!(
            serde_json::to_string(&StatusFilter::Deactive).unwrap(),
            "\"deactive\""
        );
    }

    #[test]
    fn test_filter_state_builders() {
        let state = FilterState::default()
            .with_deputy("A")
            .with_status(StatusFilter::Active)
            .with_search("ben");
        assert_eq!(state.deputy, "A");
        assert_eq!(state.directorate, "");
        assert_eq!(state.status.as_str(), "active");
        assert!(!state.is_empty());
        assert!(FilterState::default().is_empty());
    }

    #[test]
    fn test_default_precedence_is_strict() {
        assert_eq!(SearchPrecedence::default(), SearchPrecedence::Strict);
    }
}

//! Reference lists (directorates, deputy ministries, employment types).

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use shared::text::contains_ignore_case;

/// Ids of the directorate entries that are valid deputy ministries.
pub const DEPUTY_MINISTRY_IDS: RangeInclusive<i64> = 1..=5;

/// An `{ id, name }` lookup entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub id: i64,
    pub name: String,
}

impl ReferenceEntry {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Which reference list an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Directorate,
    DeputyMinistry,
    EmploymentType,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Directorate => write!(f, "directorate"),
            ReferenceKind::DeputyMinistry => write!(f, "deputy ministry"),
            ReferenceKind::EmploymentType => write!(f, "employment type"),
        }
    }
}

/// Reference lists fetched once at load time. Read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceDataCache {
    directorates: Vec<ReferenceEntry>,
    deputy_ministries: Vec<ReferenceEntry>,
    employment_types: Vec<ReferenceEntry>,
}

impl ReferenceDataCache {
    pub fn new(
        directorates: Vec<ReferenceEntry>,
        deputy_ministries: Vec<ReferenceEntry>,
        employment_types: Vec<ReferenceEntry>,
    ) -> Self {
        Self {
            directorates,
            deputy_ministries,
            employment_types,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.directorates.is_empty()
            && self.deputy_ministries.is_empty()
            && self.employment_types.is_empty()
    }

    /// Selectable options for a list. Deputy ministries are restricted to
    /// [`DEPUTY_MINISTRY_IDS`].
    pub fn options(&self, kind: ReferenceKind) -> Vec<&ReferenceEntry> {
        match kind {
            ReferenceKind::Directorate => self.directorates.iter().collect(),
            ReferenceKind::DeputyMinistry => self
                .deputy_ministries
                .iter()
                .filter(|e| DEPUTY_MINISTRY_IDS.contains(&e.id))
                .collect(),
            ReferenceKind::EmploymentType => self.employment_types.iter().collect(),
        }
    }

    /// Options whose name contains `query`, case-insensitively.
    /// An empty query returns every option.
    pub fn search(&self, kind: ReferenceKind, query: &str) -> Vec<&ReferenceEntry> {
        self.options(kind)
            .into_iter()
            .filter(|e| contains_ignore_case(&e.name, query))
            .collect()
    }

    /// Exact name lookup among the selectable options.
    pub fn find_by_name(&self, kind: ReferenceKind, name: &str) -> Option<&ReferenceEntry> {
        self.options(kind).into_iter().find(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(ids: &[i64]) -> Vec<ReferenceEntry> {
        ids.iter()
            .map(|id| ReferenceEntry::new(*id, format!("Ministry {}", id)))
            .collect()
    }

    #[test]
    fn test_deputy_ministry_options_restricted_to_range() {
        let cache = ReferenceDataCache::new(vec![], entries(&[1, 2, 3, 6, 7]), vec![]);
        let ids: Vec<i64> = cache
            .options(ReferenceKind::DeputyMinistry)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_directorate_options_unrestricted() {
        let cache = ReferenceDataCache::new(entries(&[1, 6, 9]), vec![], vec![]);
        assert_eq!(cache.options(ReferenceKind::Directorate).len(), 3);
    }

    #[test]
    fn test_search_case_insensitive() {
        let cache = ReferenceDataCache::new(
            vec![
                ReferenceEntry::new(1, "Information Technology"),
                ReferenceEntry::new(2, "Human Resources"),
            ],
            vec![],
            vec![],
        );
        let hits = cache.search(ReferenceKind::Directorate, "TECH");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
        assert_eq!(cache.search(ReferenceKind::Directorate, "").len(), 2);
    }

    #[test]
    fn test_search_deputy_never_returns_out_of_range() {
        let cache = ReferenceDataCache::new(vec![], entries(&[2, 8]), vec![]);
        let hits = cache.search(ReferenceKind::DeputyMinistry, "ministry");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn test_find_by_name_exact() {
        let cache = ReferenceDataCache::new(entries(&[1, 2]), vec![], vec![]);
        assert_eq!(
            cache
                .find_by_name(ReferenceKind::Directorate, "Ministry 2")
                .map(|e| e.id),
            Some(2)
        );
        assert!(cache
            .find_by_name(ReferenceKind::Directorate, "ministry 2")
            .is_none());
    }

    #[test]
    fn test_empty_cache() {
        assert!(ReferenceDataCache::default().is_empty());
        assert!(!ReferenceDataCache::new(vec![], vec![], entries(&[1])).is_empty());
    }
}

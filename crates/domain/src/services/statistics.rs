//! Summary statistics derived from the user collection.

use serde::Serialize;

use crate::models::{UserRecord, UserStatus};

/// Bucket for records without an employment type or deputy ministry.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Label to count mapping that iterates in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelCounts(Vec<(String, usize)>);

impl LabelCounts {
    fn increment(&mut self, label: &str) {
        match self.0.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1,
            None => self.0.push((label.to_string(), 1)),
        }
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(l, c)| (l.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sum(&self) -> usize {
        self.0.iter().map(|(_, c)| c).sum()
    }
}

/// Aggregate counts shown above the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedStatistics {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub by_employment_type: LabelCounts,
    pub by_deputy_ministry: LabelCounts,
}

impl DerivedStatistics {
    /// Compute statistics over a sequence of records.
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a UserRecord>,
    {
        let mut stats = Self::default();

        for record in records {
            stats.total += 1;
            match record.status_kind() {
                UserStatus::Active => stats.active += 1,
                UserStatus::Inactive => stats.inactive += 1,
                UserStatus::Unknown => {}
            }

            let employment = record
                .employment_type
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or(UNKNOWN_LABEL);
            stats.by_employment_type.increment(employment);

            let deputy = if record.deputy.is_empty() {
                UNKNOWN_LABEL
            } else {
                record.deputy.as_str()
            };
            stats.by_deputy_ministry.increment(deputy);
        }

        stats
    }

    /// Records whose status is neither active nor inactive.
    pub fn unknown_status(&self) -> usize {
        self.total - self.active - self.inactive
    }
}

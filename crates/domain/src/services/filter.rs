//! Row filtering for the users table.

use shared::text::{contains_ignore_case, opt_contains_ignore_case};

use crate::models::{FilterState, SearchPrecedence, StatusFilter, UserRecord, UserStatus};

/// Predicate combining the equality filters with the free-text search.
#[derive(Debug, Clone, Copy)]
pub struct FilterPredicate<'a> {
    state: &'a FilterState,
    precedence: SearchPrecedence,
}

impl<'a> FilterPredicate<'a> {
    pub fn new(state: &'a FilterState, precedence: SearchPrecedence) -> Self {
        Self { state, precedence }
    }

    pub fn strict(state: &'a FilterState) -> Self {
        Self::new(state, SearchPrecedence::Strict)
    }

    /// Deputy ministry, directorate and status filters.
    fn passes_equality(&self, record: &UserRecord) -> bool {
        let deputy = self.state.deputy.is_empty() || record.deputy == self.state.deputy;
        let directorate =
            self.state.directorate.is_empty() || record.directorate == self.state.directorate;
        let status = match self.state.status {
            StatusFilter::Any => true,
            StatusFilter::Active => record.status_kind() == UserStatus::Active,
            StatusFilter::Deactive => record.status_kind() == UserStatus::Inactive,
        };
        deputy && directorate && status
    }

    fn matches_identity(&self, record: &UserRecord) -> bool {
        let term = &self.state.search;
        contains_ignore_case(&record.name, term)
            || contains_ignore_case(&record.username, term)
            || contains_ignore_case(&record.phone, term)
    }

    fn matches_other_fields(&self, record: &UserRecord) -> bool {
        let term = &self.state.search;
        opt_contains_ignore_case(record.employment_type.as_deref(), term)
            || contains_ignore_case(&record.device_type, term)
            || contains_ignore_case(&record.lastname, term)
            || opt_contains_ignore_case(record.violation_type.as_deref(), term)
            || contains_ignore_case(&record.violations_count, term)
    }

    pub fn matches(&self, record: &UserRecord) -> bool {
        match self.precedence {
            SearchPrecedence::Strict => {
                self.passes_equality(record)
                    && (self.matches_identity(record) || self.matches_other_fields(record))
            }
            SearchPrecedence::Legacy => {
                (self.passes_equality(record) && self.matches_identity(record))
                    || self.matches_other_fields(record)
            }
        }
    }

    /// Records passing the predicate, in their original order.
    pub fn apply<'r, I>(&self, records: I) -> Vec<&'r UserRecord>
    where
        I: IntoIterator<Item = &'r UserRecord>,
    {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

//! In-memory list of user records backing the table.

use std::collections::HashSet;

use crate::models::{UserId, UserRecord};

/// Ordered collection of user records, unique by id.
///
/// Only mutated through [`load`](Self::load), [`replace`](Self::replace) and
/// [`remove`](Self::remove); callers mutate after the remote call succeeded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserCollection {
    records: Vec<UserRecord>,
}

impl UserCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire collection.
    ///
    /// When the input repeats an id, the first occurrence wins.
    pub fn load(&mut self, records: Vec<UserRecord>) {
        let mut seen = HashSet::with_capacity(records.len());
        let incoming = records.len();
        self.records = records
            .into_iter()
            .filter(|r| seen.insert(r.id.clone()))
            .collect();

        let dropped = incoming - self.records.len();
        if dropped > 0 {
            tracing::warn!(dropped, "Duplicate user ids dropped while loading");
        }
    }

    /// Substitute the record with matching `id` in place.
    ///
    /// Returns `false` when no record has that id. The replacement keeps the
    /// slot's id so uniqueness is preserved even if the server echoes another.
    pub fn replace(&mut self, id: &UserId, mut record: UserRecord) -> bool {
        match self.records.iter_mut().find(|r| &r.id == id) {
            Some(slot) => {
                record.id = slot.id.clone();
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Delete the record with matching `id`, returning it.
    pub fn remove(&mut self, id: &UserId) -> Option<UserRecord> {
        let pos = self.position(id)?;
        Some(self.records.remove(pos))
    }

    pub fn get(&self, id: &UserId) -> Option<&UserRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn position(&self, id: &UserId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UserRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a UserCollection {
    type Item = &'a UserRecord;
    type IntoIter = std::slice::Iter<'a, UserRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

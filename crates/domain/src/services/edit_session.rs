//! Edit session for a single user record.
//!
//! `Closed` → `Open` on [`EditSession::open`]; back to `Closed` on cancel or
//! on a successful save. A failed save leaves the session open and untouched.

use tracing::{info, warn};
use validator::Validate;

use crate::models::{
    EditForm, EditableField, FormError, ReferenceDataCache, ReferenceEntry, ReferenceKind,
    UserPatch, UserRecord,
};
use crate::services::{AuthProvider, RemoteUserStore, ScreenError, UserCollection};

/// Query text and current selection of one reference lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupState {
    pub query: String,
    pub selected: Option<ReferenceEntry>,
}

/// State of an open session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSession {
    record: UserRecord,
    form: EditForm,
    directorate: LookupState,
    deputy: LookupState,
}

impl OpenSession {
    fn new(record: &UserRecord, references: &ReferenceDataCache) -> Self {
        let directorate = LookupState {
            query: String::new(),
            selected: references
                .find_by_name(ReferenceKind::Directorate, &record.directorate)
                .cloned(),
        };
        let deputy = LookupState {
            query: String::new(),
            selected: references
                .find_by_name(ReferenceKind::DeputyMinistry, &record.deputy)
                .cloned(),
        };

        Self {
            record: record.clone(),
            form: EditForm::from_record(record),
            directorate,
            deputy,
        }
    }

    /// The record as it was when the session opened.
    pub fn record(&self) -> &UserRecord {
        &self.record
    }

    pub fn form(&self) -> &EditForm {
        &self.form
    }

    pub fn set_field(&mut self, field: EditableField, raw: &str) -> Result<(), FormError> {
        self.form.set(field, raw)
    }

    /// Lookup state for directorate or deputy ministry; `None` for other lists.
    pub fn lookup(&self, kind: ReferenceKind) -> Option<&LookupState> {
        match kind {
            ReferenceKind::Directorate => Some(&self.directorate),
            ReferenceKind::DeputyMinistry => Some(&self.deputy),
            ReferenceKind::EmploymentType => None,
        }
    }

    fn lookup_mut(&mut self, kind: ReferenceKind) -> Option<&mut LookupState> {
        match kind {
            ReferenceKind::Directorate => Some(&mut self.directorate),
            ReferenceKind::DeputyMinistry => Some(&mut self.deputy),
            ReferenceKind::EmploymentType => None,
        }
    }

    /// Update the query text of a lookup. Ignored for lists without a lookup.
    pub fn set_query(&mut self, kind: ReferenceKind, query: impl Into<String>) {
        if let Some(lookup) = self.lookup_mut(kind) {
            lookup.query = query.into();
        }
    }

    /// Entries matching the lookup's current query.
    pub fn candidates<'r>(
        &self,
        kind: ReferenceKind,
        references: &'r ReferenceDataCache,
    ) -> Vec<&'r ReferenceEntry> {
        let query = self.lookup(kind).map(|l| l.query.as_str()).unwrap_or("");
        references.search(kind, query)
    }

    /// Select an entry (or clear with `None`) and write its name into the form.
    pub fn select(&mut self, kind: ReferenceKind, entry: Option<ReferenceEntry>) {
        self.form.set_reference(kind, entry.as_ref());
        if let Some(lookup) = self.lookup_mut(kind) {
            lookup.selected = entry;
        }
    }

    pub fn patch(&self) -> UserPatch {
        self.form.to_patch()
    }
}

/// Edit session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Closed,
    Open(OpenSession),
}

impl EditSession {
    /// Open a session for `record`, replacing any session already open.
    pub fn open(&mut self, record: &UserRecord, references: &ReferenceDataCache) {
        *self = EditSession::Open(OpenSession::new(record, references));
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EditSession::Open(_))
    }

    pub fn current(&self) -> Option<&OpenSession> {
        match self {
            EditSession::Open(session) => Some(session),
            EditSession::Closed => None,
        }
    }

    pub fn current_mut(&mut self) -> Option<&mut OpenSession> {
        match self {
            EditSession::Open(session) => Some(session),
            EditSession::Closed => None,
        }
    }

    /// Discard all edits.
    pub fn cancel(&mut self) {
        *self = EditSession::Closed;
    }

    /// Submit the form as a partial update.
    ///
    /// On success the server's record replaces the collection entry and the
    /// session closes. On any failure neither the session nor the collection
    /// changes.
    pub async fn save<S>(
        &mut self,
        store: &S,
        auth: &dyn AuthProvider,
        users: &mut UserCollection,
    ) -> Result<UserRecord, ScreenError>
    where
        S: RemoteUserStore + ?Sized,
    {
        let session = self.current().ok_or(ScreenError::NoSession)?;
        let id = session.record.id.clone();
        let patch = session.patch();

        if let Err(errors) = patch.validate() {
            warn!(user_id = %id, error = %errors, "Edit form failed presence checks");
            let mut fields: Vec<String> = errors
                .field_errors()
                .iter()
                .map(|(field, errs)| {
                    let reason = errs
                        .first()
                        .map(|e| match &e.message {
                            Some(m) => m.to_string(),
                            None => e.code.to_string(),
                        })
                        .unwrap_or_default();
                    format!("{}: {}", field, reason)
                })
                .collect();
            fields.sort();
            return Err(ScreenError::InvalidForm(fields.join(", ")));
        }

        let token = auth.token();
        let updated = store
            .update_user(&id, &patch, token.as_deref())
            .await
            .map_err(|e| {
                warn!(user_id = %id, error = %e, "Update failed");
                ScreenError::UpdateFailed(e)
            })?;

        if !users.replace(&id, updated.clone()) {
            warn!(user_id = %id, "Updated user is no longer in the collection");
        }
        info!(user_id = %id, "User updated");
        self.cancel();
        Ok(updated)
    }
}

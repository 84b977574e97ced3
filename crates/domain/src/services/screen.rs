//! Screen controller tying the collection, filters and edit flows together.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{FilterState, ReferenceDataCache, SearchPrecedence, UserId, UserRecord};
use crate::services::{
    AuthProvider, DerivedStatistics, EditSession, FilterPredicate, OpenSession, RemoteUserStore,
    StoreError, UserCollection,
};

/// User-facing failures of the screen operations.
///
/// Every remote failure is reported the same way regardless of cause; the
/// underlying [`StoreError`] is kept as the source for logging.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("Failed to fetch users. Please try again later.")]
    LoadFailed(#[source] StoreError),

    #[error("Failed to update user.")]
    UpdateFailed(#[source] StoreError),

    /// Presence checks failed; carries `field: message` pairs.
    #[error("Failed to update user: {0}")]
    InvalidForm(String),

    #[error("Failed to delete user.")]
    DeleteFailed(#[source] StoreError),

    #[error("No edit session is open")]
    NoSession,

    #[error("User {0} not found")]
    NotFound(UserId),
}

/// Progress of the initial fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded)
    }
}

/// The internet users screen.
///
/// Owns the user collection and reference lists for the lifetime of the
/// screen. Rows and statistics are re-derived on every call.
pub struct UsersScreen<S> {
    store: S,
    users: UserCollection,
    references: ReferenceDataCache,
    filter: FilterState,
    precedence: SearchPrecedence,
    load_state: LoadState,
    edit: EditSession,
    notice: Option<String>,
}

impl<S: RemoteUserStore> UsersScreen<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            users: UserCollection::new(),
            references: ReferenceDataCache::default(),
            filter: FilterState::default(),
            precedence: SearchPrecedence::default(),
            load_state: LoadState::Idle,
            edit: EditSession::default(),
            notice: None,
        }
    }

    pub fn with_precedence(mut self, precedence: SearchPrecedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch users and the reference lists concurrently.
    ///
    /// A reference failure is logged and leaves the option lists empty. A
    /// user failure moves the screen to [`LoadState::Failed`].
    pub async fn load(&mut self) -> Result<(), ScreenError> {
        self.load_state = LoadState::Loading;
        debug!("Loading internet users and reference data");

        let store = &self.store;
        let references = async {
            tokio::try_join!(
                store.list_directorates(),
                store.list_deputy_ministries(),
                store.list_employment_types(),
            )
        };
        let (users, references) = tokio::join!(store.list_users(), references);

        self.references = match references {
            Ok((directorates, deputies, employment_types)) => {
                ReferenceDataCache::new(directorates, deputies, employment_types)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load reference data, filter options will be empty");
                ReferenceDataCache::default()
            }
        };

        match users {
            Ok(records) => {
                self.users.load(records);
                self.load_state = LoadState::Loaded;
                info!(count = self.users.len(), "Internet users loaded");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load internet users");
                let err = ScreenError::LoadFailed(e);
                self.load_state = LoadState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn users(&self) -> &UserCollection {
        &self.users
    }

    pub fn references(&self) -> &ReferenceDataCache {
        &self.references
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut FilterState {
        &mut self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    pub fn precedence(&self) -> SearchPrecedence {
        self.precedence
    }

    /// Rows passing the current filters, in collection order.
    pub fn visible_rows(&self) -> Vec<&UserRecord> {
        FilterPredicate::new(&self.filter, self.precedence).apply(&self.users)
    }

    /// Statistics over the whole collection.
    pub fn statistics(&self) -> DerivedStatistics {
        DerivedStatistics::compute(&self.users)
    }

    /// Open an edit session for the record with `id`.
    pub fn begin_edit(&mut self, id: &UserId) -> Result<&mut OpenSession, ScreenError> {
        let record = self
            .users
            .get(id)
            .ok_or_else(|| ScreenError::NotFound(id.clone()))?;
        self.edit.open(record, &self.references);
        debug!(user_id = %id, "Edit session opened");
        self.edit.current_mut().ok_or(ScreenError::NoSession)
    }

    pub fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    pub fn edit_session_mut(&mut self) -> &mut EditSession {
        &mut self.edit
    }

    pub fn cancel_edit(&mut self) {
        self.edit.cancel();
    }

    /// Save the open edit session. On failure the notice is set and the
    /// session stays open.
    pub async fn save_edit(&mut self, auth: &dyn AuthProvider) -> Result<UserRecord, ScreenError> {
        let result = self.edit.save(&self.store, auth, &mut self.users).await;
        if let Err(e) = &result {
            self.notice = Some(e.to_string());
        }
        result
    }

    /// Delete a user remotely, then drop it from the collection.
    ///
    /// Requires a token; without one no request is made.
    pub async fn delete(
        &mut self,
        id: &UserId,
        auth: &dyn AuthProvider,
    ) -> Result<UserRecord, ScreenError> {
        if self.users.get(id).is_none() {
            return Err(ScreenError::NotFound(id.clone()));
        }

        let result = match auth.token() {
            Some(token) => self.store.delete_user(id, &token).await,
            None => Err(StoreError::MissingToken),
        };

        if let Err(e) = result {
            warn!(user_id = %id, error = %e, "Delete failed");
            let err = ScreenError::DeleteFailed(e);
            self.notice = Some(err.to_string());
            return Err(err);
        }

        if self
            .edit
            .current()
            .is_some_and(|session| &session.record().id == id)
        {
            self.edit.cancel();
        }

        info!(user_id = %id, "User deleted");
        self.users
            .remove(id)
            .ok_or_else(|| ScreenError::NotFound(id.clone()))
    }

    /// Last user-visible failure notice, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

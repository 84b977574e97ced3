//! Domain services for the internet users screen.
//!
//! Services contain the list management and derivation logic that operates on
//! domain models, plus the seams to the remote store and the token source.

pub mod auth;
pub mod collection;
pub mod edit_session;
pub mod filter;
pub mod screen;
pub mod statistics;
pub mod user_store;

pub use auth::{AuthProvider, NoAuth, StaticToken};
pub use collection::UserCollection;
pub use edit_session::{EditSession, LookupState, OpenSession};
pub use filter::FilterPredicate;
pub use screen::{LoadState, ScreenError, UsersScreen};
pub use statistics::{DerivedStatistics, LabelCounts, UNKNOWN_LABEL};
pub use user_store::{MockUserStore, RemoteUserStore, StoreError};

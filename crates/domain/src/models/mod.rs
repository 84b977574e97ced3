//! Domain models for the internet users screen.

pub mod edit_form;
pub mod filter;
pub mod internet_user;
pub mod reference;

pub use edit_form::{
    EditForm, EditableField, FieldKind, FormError, StatusChoice, UserPatch, ViolationsChoice,
};
pub use filter::{FilterState, SearchPrecedence, StatusFilter};
pub use internet_user::{UserId, UserRecord, UserStatus, ViolationSeverity};
pub use reference::{ReferenceDataCache, ReferenceEntry, ReferenceKind, DEPUTY_MINISTRY_IDS};

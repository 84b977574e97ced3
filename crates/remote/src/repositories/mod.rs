//! Per-endpoint repositories over the internet users API.

pub mod internet_user;
pub mod reference;

pub use internet_user::InternetUserRepository;
pub use reference::ReferenceRepository;

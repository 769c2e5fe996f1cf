//! Route-level views: sign-in, registration and the protected friend list.
//!
//! Pages read the auth signal and service from context; the friend list page
//! keeps its `FriendsState` in a local signal and renders through `components`.

pub mod birthdays;
pub mod login;
pub mod register;
